use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{Profile, ProfileInput};
use crate::rest::{Filter, RestClient};

const TABLE: &str = "profiles";

/// Fetch the caller's profile; the row id equals the user id.
pub async fn get_mine(rest: &RestClient, user: &AuthUser) -> Result<Profile, ApiError> {
    let rows = rest
        .select(TABLE, &[Filter::eq("id", &user.id)], Some(&user.token))
        .await?;

    let first = match rows {
        Value::Array(mut rows) if !rows.is_empty() => rows.remove(0),
        _ => return Err(ApiError::not_found("Profile not found")),
    };

    serde_json::from_value(first)
        .map_err(|e| ApiError::upstream_unavailable(format!("unexpected profile row shape: {}", e)))
}

/// Insert-or-replace the caller's profile.
///
/// The full payload is written every time: fields the client omitted become
/// null upstream rather than being left unchanged, so two upserts with
/// different bios are strictly last-write-wins.
pub async fn upsert_mine(
    rest: &RestClient,
    user: &AuthUser,
    input: ProfileInput,
) -> Result<Value, ApiError> {
    let payload = json!({
        "id": user.id,
        "username": input.username,
        "avatar_url": input.avatar_url,
        "bio": input.bio,
        "updated_at": Utc::now(),
    });

    rest.upsert(TABLE, &payload, &user.token).await
}
