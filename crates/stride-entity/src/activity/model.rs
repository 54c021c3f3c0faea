//! Activity session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use stride_core::types::{SessionId, UserId};

use super::status::SessionStatus;

/// A recorded run belonging to exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivitySession {
    /// Unique session identifier.
    pub id: SessionId,
    /// The runner.
    pub user_id: UserId,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// When the run started.
    pub start_time: DateTime<Utc>,
    /// When the run ended, if it did.
    pub end_time: Option<DateTime<Utc>>,
}

impl ActivitySession {
    /// Create a completed session that started at `start_time`.
    pub fn completed(user_id: UserId, start_time: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            status: SessionStatus::Completed,
            start_time,
            end_time: None,
        }
    }

    /// Whether this session counts as activity.
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Project the session down to what the sweep reads.
    pub fn start(&self) -> SessionStart {
        SessionStart {
            start_time: self.start_time,
        }
    }
}

/// The only column the sweep needs from a user's latest completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionStart {
    /// When the run started.
    pub start_time: DateTime<Utc>,
}
