//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use stride_core::types::{NotificationId, UserId};

use super::kind::NotificationKind;

/// Title of the inactivity reminder.
pub const INACTIVE_REMINDER_TITLE: &str = "💤 WAKE UP, SOLDIER";

/// Body of the inactivity reminder.
pub const INACTIVE_REMINDER_MESSAGE: &str =
    "Your legs are getting rusty. Run for 15 mins today to stay combat-ready!";

/// A notification delivered to a user's in-app inbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification kind, stored in the `type` column.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Check whether this row is of the given kind.
    pub fn is_kind(&self, kind: NotificationKind) -> bool {
        self.kind == kind.as_str()
    }
}

/// Data required to create a notification. Serializes to the insert
/// body expected by the hosted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: UserId,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Notification kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Always `false` on creation.
    pub is_read: bool,
    /// Creation time, as seen by the caller.
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// Build the fixed inactivity reminder for a user.
    pub fn inactive_reminder(user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            title: INACTIVE_REMINDER_TITLE.to_string(),
            message: INACTIVE_REMINDER_MESSAGE.to_string(),
            kind: NotificationKind::InactiveReminder,
            is_read: false,
            created_at,
        }
    }

    /// Materialize the stored row, assigning a fresh id.
    pub fn into_notification(self) -> Notification {
        Notification {
            id: NotificationId::new(),
            user_id: self.user_id,
            title: self.title,
            message: self.message,
            kind: self.kind.as_str().to_string(),
            is_read: self.is_read,
            created_at: self.created_at,
        }
    }
}
