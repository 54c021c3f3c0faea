//! In-process scheduler configuration.

use serde::{Deserialize, Serialize};

/// Cron scheduler configuration.
///
/// Disabled by default: the hosting platform's cron normally calls the
/// HTTP trigger instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the in-process scheduler is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Six-field cron expression (seconds first).
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Run one sweep immediately when the server starts.
    #[serde(default)]
    pub run_on_startup: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            schedule: default_schedule(),
            run_on_startup: false,
        }
    }
}

fn default_schedule() -> String {
    "0 0 9 * * *".to_string()
}
