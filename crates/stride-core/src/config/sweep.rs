//! Inactivity sweep policy configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest accepted cooldown, roughly a century.
pub const MAX_COOLDOWN_DAYS: i64 = 36_500;

/// Thresholds and fan-out for the inactivity sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Whole days since the last completed session before a user is
    /// reminder-eligible. Inclusive.
    #[serde(default = "default_threshold")]
    pub inactivity_threshold_days: i64,
    /// Minimum days between two inactivity reminders to the same user.
    #[serde(default = "default_cooldown")]
    pub cooldown_days: i64,
    /// Number of users processed at once. `1` keeps the sweep strictly
    /// sequential.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold_days: default_threshold(),
            cooldown_days: default_cooldown(),
            concurrency: default_concurrency(),
        }
    }
}

impl SweepConfig {
    /// Reject values that would make the sweep meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.inactivity_threshold_days < 1 {
            return Err(AppError::configuration(
                "sweep.inactivity_threshold_days must be at least 1",
            ));
        }
        if !(0..=MAX_COOLDOWN_DAYS).contains(&self.cooldown_days) {
            return Err(AppError::configuration(format!(
                "sweep.cooldown_days must be between 0 and {MAX_COOLDOWN_DAYS}"
            )));
        }
        if self.concurrency == 0 {
            return Err(AppError::configuration(
                "sweep.concurrency must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_threshold() -> i64 {
    3
}

fn default_cooldown() -> i64 {
    7
}

fn default_concurrency() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = SweepConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = SweepConfig {
            inactivity_threshold_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(SweepConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bounds_cooldown() {
        let huge = SweepConfig {
            cooldown_days: 200_000_000,
            ..Default::default()
        };
        let err = huge.validate().unwrap_err();
        assert!(err.message.contains("sweep.cooldown_days"));

        let negative = SweepConfig {
            cooldown_days: -1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let century = SweepConfig {
            cooldown_days: MAX_COOLDOWN_DAYS,
            ..Default::default()
        };
        assert!(century.validate().is_ok());
    }
}
