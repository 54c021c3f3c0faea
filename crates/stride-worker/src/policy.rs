//! Inactivity policy: how long since a user's last run, and when a
//! reminder is due.

use chrono::{DateTime, Duration, Utc};

use stride_core::config::SweepConfig;
use stride_core::error::AppError;
use stride_core::result::AppResult;

/// Days reported for a user with no completed session at all.
pub const NO_HISTORY_DAYS: i64 = 999;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days between `now` and the start of the last completed run.
///
/// The difference is absolute and rounded up, so a run 49 hours ago counts
/// as 3 days and a start time in the future counts the same as one in the
/// past. `None` yields [`NO_HISTORY_DAYS`].
pub fn days_since(now: DateTime<Utc>, last_start: Option<DateTime<Utc>>) -> i64 {
    match last_start {
        None => NO_HISTORY_DAYS,
        Some(start) => {
            let millis = (now - start).num_milliseconds().abs();
            (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
        }
    }
}

/// Threshold and cooldown taken from the `[sweep]` configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityPolicy {
    /// Minimum days since the last run before a user is eligible.
    pub threshold_days: i64,
    /// Minimum days between two reminders to the same user.
    pub cooldown_days: i64,
}

impl InactivityPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            threshold_days: config.inactivity_threshold_days,
            cooldown_days: config.cooldown_days,
        }
    }

    /// Whether `days` since the last run makes the user eligible.
    pub fn is_inactive(&self, days: i64) -> bool {
        days >= self.threshold_days
    }

    /// Earliest creation time of a reminder that still blocks a new one.
    pub fn cooldown_start(&self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        Duration::try_days(self.cooldown_days)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "sweep.cooldown_days {} is out of range",
                    self.cooldown_days
                ))
            })
    }
}

impl Default for InactivityPolicy {
    fn default() -> Self {
        Self::from_config(&SweepConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_no_history_is_sentinel() {
        let now = at("2024-06-10T09:00:00Z");
        assert_eq!(days_since(now, None), NO_HISTORY_DAYS);
        assert!(InactivityPolicy::default().is_inactive(NO_HISTORY_DAYS));
    }

    #[test]
    fn test_days_round_up() {
        let now = at("2024-06-10T09:00:00Z");
        assert_eq!(days_since(now, Some(now)), 0);
        assert_eq!(days_since(now, Some(at("2024-06-10T08:59:59.999Z"))), 1);
        assert_eq!(days_since(now, Some(at("2024-06-08T09:00:00Z"))), 2);
        assert_eq!(days_since(now, Some(at("2024-06-08T08:00:00Z"))), 3);
        assert_eq!(days_since(now, Some(at("2024-06-07T09:00:00Z"))), 3);
    }

    #[test]
    fn test_future_start_counts_as_elapsed() {
        let now = at("2024-06-10T09:00:00Z");
        assert_eq!(days_since(now, Some(at("2024-06-14T09:00:00Z"))), 4);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = InactivityPolicy::default();
        assert!(!policy.is_inactive(2));
        assert!(policy.is_inactive(3));
        assert!(policy.is_inactive(4));
    }

    #[test]
    fn test_cooldown_start() {
        let policy = InactivityPolicy {
            threshold_days: 3,
            cooldown_days: 7,
        };
        let now = at("2024-06-10T09:00:00Z");
        assert_eq!(policy.cooldown_start(now).unwrap(), at("2024-06-03T09:00:00Z"));
    }

    #[test]
    fn test_cooldown_start_out_of_range() {
        let policy = InactivityPolicy {
            threshold_days: 3,
            cooldown_days: 200_000_000,
        };
        let err = policy.cooldown_start(at("2024-06-10T09:00:00Z")).unwrap_err();
        assert!(err.message.contains("sweep.cooldown_days"));
    }
}
