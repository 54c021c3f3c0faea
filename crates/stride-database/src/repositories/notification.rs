//! Notification repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use stride_core::error::{AppError, ErrorKind};
use stride_core::result::AppResult;
use stride_core::types::{NotificationId, UserId};
use stride_entity::notification::{NewNotification, Notification, NotificationKind};

/// Repository for notification reads and inserts.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ids of the user's notifications of `kind` created at or after `since`.
    pub async fn find_recent_ids(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<NotificationId>> {
        sqlx::query_scalar::<_, NotificationId>(
            "SELECT id FROM notifications \
             WHERE user_id = $1 AND type = $2 AND created_at >= $3",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to query recent notifications: {e}"),
                e,
            )
        })
    }

    /// Create a notification.
    pub async fn create(&self, new: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, title, message, type, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, user_id, title, message, type, is_read, created_at",
        )
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.message)
        .bind(new.kind.as_str())
        .bind(new.is_read)
        .bind(new.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to create notification: {e}"),
                e,
            )
        })
    }
}
