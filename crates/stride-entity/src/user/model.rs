//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use stride_core::types::UserId;

/// A user as seen by the sweep. Owned by the user-management side of the
/// product; never written here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Human-readable display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Public handle.
    #[serde(default)]
    pub username: Option<String>,
}

impl User {
    /// Create a user with the given handle.
    pub fn new(id: UserId, full_name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id,
            full_name: Some(full_name.into()),
            username: Some(username.into()),
        }
    }

    /// The handle to use in log lines, falling back to the id.
    pub fn handle(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.id.to_string(),
        }
    }
}
