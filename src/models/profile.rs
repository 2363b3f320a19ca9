use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A profile row from the upstream `profiles` table. The id is the owning
/// user's id; there is at most one profile per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client payload for upserting the caller's profile. Absent fields are
/// written as null upstream; there is no partial-merge semantics, so callers
/// send the full payload every time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}
