use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::gateway;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Habit, HabitInput};
use crate::AppState;

/// POST /habits - Create a habit owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<HabitInput>,
) -> ApiResult<Value> {
    let row = gateway::habits::create(&state.rest, &user, input).await?;
    Ok(ApiResponse::success(row))
}

/// GET /habits - List the caller's habits
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Habit>>, ApiError> {
    let habits = gateway::habits::list_mine(&state.rest, &user).await?;
    Ok(Json(habits))
}

/// GET /habits/public - List publicly visible habits (no auth)
pub async fn list_public(State(state): State<AppState>) -> Result<Json<Vec<Habit>>, ApiError> {
    let habits = gateway::habits::list_public(&state.rest).await?;
    Ok(Json(habits))
}

/// PUT /habits/:id - Replace a habit the caller owns
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(input): Json<HabitInput>,
) -> ApiResult<Value> {
    let result = gateway::habits::update(&state.rest, &user, id, input).await?;
    Ok(ApiResponse::success(result))
}

/// DELETE /habits/:id - Delete a habit the caller owns
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    let result = gateway::habits::delete(&state.rest, &user, id).await?;
    Ok(ApiResponse::success(result))
}
