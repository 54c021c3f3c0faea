//! Inactivity sweep and scheduled tasks for Stride.
//!
//! This crate provides:
//! - The inactivity policy (days since last run, threshold, cooldown window)
//! - [`InactivitySweep`], one full pass over all users
//! - A cron scheduler that runs the sweep on a configured schedule

pub mod policy;
pub mod scheduler;
pub mod sweep;

pub use policy::InactivityPolicy;
pub use scheduler::CronScheduler;
pub use sweep::{InactivitySweep, SweepSummary, UserOutcome};
