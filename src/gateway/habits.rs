use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{Habit, HabitInput};
use crate::rest::{Filter, RestClient};

const TABLE: &str = "habits";

/// Insert a habit owned by the caller.
///
/// Ownership and the creation timestamp are stamped server-side; whatever the
/// client sent for those fields has already been dropped during input
/// deserialization. The upstream echo is authoritative for id and timestamps.
pub async fn create(rest: &RestClient, user: &AuthUser, input: HabitInput) -> Result<Value, ApiError> {
    validate_name(&input.name)?;

    let payload = json!({
        "user_id": user.id,
        "name": input.name,
        "description": input.description,
        "is_public": input.is_public,
        "created_at": Utc::now(),
    });

    rest.insert(TABLE, &payload, &user.token).await
}

/// All habits owned by the caller, in upstream-determined order.
pub async fn list_mine(rest: &RestClient, user: &AuthUser) -> Result<Vec<Habit>, ApiError> {
    let rows = rest
        .select(TABLE, &[Filter::eq("user_id", &user.id)], Some(&user.token))
        .await?;
    parse_rows(rows)
}

/// All publicly visible habits. Anonymous: no bearer token is sent, so the
/// read cannot impersonate anyone.
pub async fn list_public(rest: &RestClient) -> Result<Vec<Habit>, ApiError> {
    let rows = rest
        .select(TABLE, &[Filter::eq("is_public", "true")], None)
        .await?;
    parse_rows(rows)
}

/// Replace a habit the caller owns.
///
/// Ownership is enforced by the compound `id AND user_id` filter in a single
/// upstream request. A habit owned by someone else matches zero rows and the
/// result is an empty array, not a forbidden error.
pub async fn update(
    rest: &RestClient,
    user: &AuthUser,
    id: i64,
    input: HabitInput,
) -> Result<Value, ApiError> {
    validate_name(&input.name)?;

    let payload = json!({
        "name": input.name,
        "description": input.description,
        "is_public": input.is_public,
        "updated_at": Utc::now(),
    });

    rest.update(TABLE, &owner_scoped(id, user), &payload, &user.token)
        .await
}

/// Delete a habit the caller owns, with the same ownership-scoped filter as
/// `update`.
pub async fn delete(rest: &RestClient, user: &AuthUser, id: i64) -> Result<Value, ApiError> {
    rest.delete(TABLE, &owner_scoped(id, user), &user.token).await
}

fn owner_scoped(id: i64, user: &AuthUser) -> [Filter; 2] {
    [
        Filter::eq("id", id.to_string()),
        Filter::eq("user_id", &user.id),
    ]
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("habit name must not be empty"));
    }
    Ok(())
}

fn parse_rows(rows: Value) -> Result<Vec<Habit>, ApiError> {
    serde_json::from_value(rows)
        .map_err(|e| ApiError::upstream_unavailable(format!("unexpected habit row shape: {}", e)))
}
