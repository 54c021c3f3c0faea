//! Run session repository implementation.

use sqlx::PgPool;

use stride_core::error::{AppError, ErrorKind};
use stride_core::result::AppResult;
use stride_core::types::UserId;
use stride_entity::activity::{SessionStart, SessionStatus};

/// Read access to the `run_sessions` table.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Start time of the user's most recent completed session, if any.
    pub async fn latest_completed_start(&self, user_id: UserId) -> AppResult<Option<SessionStart>> {
        sqlx::query_as::<_, SessionStart>(
            "SELECT start_time FROM run_sessions \
             WHERE user_id = $1 AND status = $2 \
             ORDER BY start_time DESC LIMIT 1",
        )
        .bind(user_id)
        .bind(SessionStatus::Completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to find latest completed session: {e}"),
                e,
            )
        })
    }
}
