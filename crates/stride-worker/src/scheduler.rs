//! Cron scheduler for the periodic inactivity sweep.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use stride_core::config::WorkerConfig;
use stride_core::error::AppError;

use crate::sweep::InactivitySweep;

/// Cron-based scheduler that runs the inactivity sweep
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Sweep run on every tick
    sweep: Arc<InactivitySweep>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(sweep: Arc<InactivitySweep>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, sweep })
    }

    /// Register the sweep on the configured schedule
    pub async fn register_sweep(&self, config: &WorkerConfig) -> Result<(), AppError> {
        let sweep = Arc::clone(&self.sweep);
        let job = CronJob::new_async(config.schedule.as_str(), move |_uuid, _lock| {
            let sweep = Arc::clone(&sweep);
            Box::pin(async move {
                run_scheduled_sweep(&sweep).await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid worker.schedule '{}': {e}",
                config.schedule
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add sweep schedule: {e}")))?;

        tracing::info!(schedule = %config.schedule, "Registered: inactivity_sweep");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

/// Run one sweep outside a request, logging the result.
///
/// Used by the cron job and the optional run on startup; errors never
/// propagate.
pub async fn run_scheduled_sweep(sweep: &InactivitySweep) {
    match sweep.run().await {
        Ok(summary) => tracing::info!("Scheduled sweep: {}", summary.message()),
        Err(e) => tracing::error!("Scheduled sweep failed: {e}"),
    }
}
