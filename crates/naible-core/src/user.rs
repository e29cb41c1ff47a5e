//! Anonymous user identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Locally generated identity. Never reconciled with a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousUser {
    pub id: String,
    pub is_anonymous: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl AnonymousUser {
    /// Creates a user with a fresh random id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_anonymous: true,
            created_at: Utc::now(),
        }
    }
}

impl Default for AnonymousUser {
    fn default() -> Self {
        Self::new()
    }
}
