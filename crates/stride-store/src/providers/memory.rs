//! In-process store provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use stride_core::result::AppResult;
use stride_core::types::{NotificationId, UserId};
use stride_entity::activity::{ActivitySession, SessionStart};
use stride_entity::notification::{NewNotification, Notification, NotificationKind};
use stride_entity::user::User;

use crate::provider::StoreProvider;

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    sessions: Vec<ActivitySession>,
    notifications: Vec<Notification>,
}

/// Store provider that keeps users, sessions, and notifications in memory.
///
/// Cloning shares the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreProvider {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStoreProvider {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user. Users are listed in insertion order.
    pub async fn add_user(&self, user: User) {
        self.state.write().await.users.push(user);
    }

    /// Record an activity session.
    pub async fn add_session(&self, session: ActivitySession) {
        self.state.write().await.sessions.push(session);
    }

    /// Record an existing notification.
    pub async fn add_notification(&self, notification: Notification) {
        self.state.write().await.notifications.push(notification);
    }

    /// All notifications addressed to a user, oldest first.
    pub async fn notifications_for(&self, user_id: UserId) -> Vec<Notification> {
        let state = self.state.read().await;
        let mut found: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|n| n.created_at);
        found
    }

    /// Total number of stored notifications.
    pub async fn notification_count(&self) -> usize {
        self.state.read().await.notifications.len()
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.state.read().await.users.clone())
    }

    async fn latest_completed_session(&self, user_id: UserId) -> AppResult<Option<SessionStart>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.is_completed())
            .max_by_key(|s| s.start_time)
            .map(ActivitySession::start))
    }

    async fn recent_notifications(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<NotificationId>> {
        let state = self.state.read().await;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && n.is_kind(kind) && n.created_at >= since)
            .map(|n| n.id)
            .collect())
    }

    async fn insert_notification(&self, notification: &NewNotification) -> AppResult<()> {
        self.state
            .write()
            .await
            .notifications
            .push(notification.clone().into_notification());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use stride_entity::activity::SessionStatus;

    #[tokio::test]
    async fn test_latest_completed_ignores_other_statuses() {
        let store = MemoryStoreProvider::new();
        let user = User::new(UserId::new(), "Ada Runner", "ada");
        let now = Utc::now();

        store
            .add_session(ActivitySession::completed(user.id, now - Duration::days(4)))
            .await;
        store
            .add_session(ActivitySession::completed(user.id, now - Duration::days(2)))
            .await;
        let mut abandoned = ActivitySession::completed(user.id, now - Duration::hours(1));
        abandoned.status = SessionStatus::Abandoned;
        store.add_session(abandoned).await;

        let latest = store.latest_completed_session(user.id).await.unwrap();
        assert_eq!(latest.map(|s| s.start_time), Some(now - Duration::days(2)));
        assert_eq!(
            store.latest_completed_session(UserId::new()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_recent_notifications_window_is_inclusive() {
        let store = MemoryStoreProvider::new();
        let user_id = UserId::new();
        let since = Utc::now() - Duration::days(7);

        store
            .insert_notification(&NewNotification::inactive_reminder(user_id, since))
            .await
            .unwrap();
        store
            .insert_notification(&NewNotification::inactive_reminder(
                user_id,
                since - Duration::seconds(1),
            ))
            .await
            .unwrap();

        let recent = store
            .recent_notifications(user_id, NotificationKind::InactiveReminder, since)
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(store.notification_count().await, 2);
    }

    #[tokio::test]
    async fn test_recent_notifications_filters_by_kind() {
        let store = MemoryStoreProvider::new();
        let user_id = UserId::new();
        let now = Utc::now();

        let mut other = NewNotification::inactive_reminder(user_id, now).into_notification();
        other.kind = "friendRequest".to_string();
        store.add_notification(other).await;

        let recent = store
            .recent_notifications(
                user_id,
                NotificationKind::InactiveReminder,
                now - Duration::days(7),
            )
            .await
            .unwrap();
        assert!(recent.is_empty());
    }
}
