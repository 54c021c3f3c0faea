//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// The `type` of a notification row.
///
/// The sweep only ever creates and reads [`NotificationKind::InactiveReminder`];
/// other kinds written by the product are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    /// "You have not run in a while" nudge.
    InactiveReminder,
}

impl NotificationKind {
    /// Return the kind as stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InactiveReminder => "inactiveReminder",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_name_matches_column_value() {
        let json = serde_json::to_string(&NotificationKind::InactiveReminder).unwrap();
        assert_eq!(json, format!("\"{}\"", NotificationKind::InactiveReminder.as_str()));
    }
}
