use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::gateway;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Profile, ProfileInput};
use crate::AppState;

/// GET /profiles/me - Fetch the caller's profile, 404 if absent
pub async fn get_mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>, ApiError> {
    let profile = gateway::profiles::get_mine(&state.rest, &user).await?;
    Ok(Json(profile))
}

/// PUT /profiles/me - Upsert the caller's profile
pub async fn upsert_mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ProfileInput>,
) -> ApiResult<Value> {
    let result = gateway::profiles::upsert_mine(&state.rest, &user, input).await?;
    Ok(ApiResponse::success(result))
}
