//! Response DTOs.

use serde::{Deserialize, Serialize};

use stride_worker::SweepSummary;

/// Body returned by a successful sweep trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    /// Always `true`.
    pub success: bool,
    /// `"Checked {N} users, sent {M} notifications"`.
    pub message: String,
    /// Reminders written by this sweep.
    pub notifications_sent: usize,
}

impl From<&SweepSummary> for SweepResponse {
    fn from(summary: &SweepSummary) -> Self {
        Self {
            success: true,
            message: summary.message(),
            notifications_sent: summary.notifications_sent,
        }
    }
}

/// Body returned when a request fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store backend in use.
    pub store: String,
    /// Whether the store answered the health probe.
    pub store_reachable: bool,
}
