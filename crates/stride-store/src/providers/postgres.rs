//! Direct PostgreSQL store provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use stride_core::result::AppResult;
use stride_core::types::{NotificationId, UserId};
use stride_database::DatabasePool;
use stride_database::repositories::{ActivityRepository, NotificationRepository, UserRepository};
use stride_entity::activity::SessionStart;
use stride_entity::notification::{NewNotification, NotificationKind};
use stride_entity::user::User;

use crate::provider::StoreProvider;

/// Store provider backed by the sqlx repositories.
#[derive(Debug, Clone)]
pub struct PostgresStoreProvider {
    db: DatabasePool,
    users: UserRepository,
    activity: ActivityRepository,
    notifications: NotificationRepository,
}

impl PostgresStoreProvider {
    /// Create a provider over an established pool.
    pub fn new(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: UserRepository::new(pool.clone()),
            activity: ActivityRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
            db,
        }
    }
}

#[async_trait]
impl StoreProvider for PostgresStoreProvider {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    async fn latest_completed_session(&self, user_id: UserId) -> AppResult<Option<SessionStart>> {
        self.activity.latest_completed_start(user_id).await
    }

    async fn recent_notifications(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<NotificationId>> {
        self.notifications.find_recent_ids(user_id, kind, since).await
    }

    async fn insert_notification(&self, notification: &NewNotification) -> AppResult<()> {
        self.notifications.create(notification).await?;
        Ok(())
    }
}
