use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A habit row as stored by the upstream `habits` table.
///
/// Identifier and timestamps are upstream-assigned; this service never owns
/// the persistent record, only the in-flight representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client payload for creating or replacing a habit.
///
/// Unknown fields (including a client-supplied `user_id`) are ignored rather
/// than rejected; ownership is always stamped from the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct HabitInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}
