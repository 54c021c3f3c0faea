//! Store provider trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use stride_core::result::AppResult;
use stride_core::types::{NotificationId, UserId};
use stride_entity::activity::SessionStart;
use stride_entity::notification::{NewNotification, NotificationKind};
use stride_entity::user::User;

/// Everything the inactivity sweep reads from and writes to the data store.
///
/// Implementations hold their own connection state and are shared as
/// `Arc<dyn StoreProvider>`. No method retries; failures surface as
/// [`AppError`](stride_core::AppError) and the caller decides whether
/// they are fatal.
#[async_trait]
pub trait StoreProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "rest", "postgres").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable with the configured credentials.
    async fn health_check(&self) -> AppResult<bool>;

    /// Every user identity.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Start of the user's most recent session with status `completed`.
    ///
    /// `Ok(None)` when the user never completed a run.
    async fn latest_completed_session(&self, user_id: UserId) -> AppResult<Option<SessionStart>>;

    /// Ids of the user's notifications of `kind` created at or after `since`.
    async fn recent_notifications(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<NotificationId>>;

    /// Persist a new notification.
    async fn insert_notification(&self, notification: &NewNotification) -> AppResult<()>;
}
