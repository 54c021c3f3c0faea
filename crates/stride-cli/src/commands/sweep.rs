//! Run an inactivity sweep from the command line.

use clap::Args;

use stride_core::error::AppError;
use stride_worker::{InactivitySweep, SweepSummary};

use crate::output::{self, OutputFormat, Row};

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Override `sweep.concurrency` for this run
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Execute one sweep and print its summary
pub async fn execute(
    args: &SweepArgs,
    config_env: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = super::load_config(config_env)?;
    if let Some(concurrency) = args.concurrency {
        config.sweep.concurrency = concurrency;
        config.sweep.validate()?;
    }

    let store = stride_store::connect(&config).await?;
    let sweep = InactivitySweep::new(store, &config.sweep);
    let summary = sweep.run().await?;

    output::print_record(&summary, summary_rows(&summary), format);
    if format == OutputFormat::Table {
        output::print_success(&summary.message());
    }
    Ok(())
}

fn summary_rows(summary: &SweepSummary) -> Vec<Row> {
    vec![
        Row::new("Users checked", summary.users_checked),
        Row::new("Notifications sent", summary.notifications_sent),
        Row::new("Skipped (active)", summary.skipped_active),
        Row::new("Skipped (reminded)", summary.skipped_recently_reminded),
        Row::new("Failed", summary.failed),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows() {
        let rows = summary_rows(&SweepSummary {
            users_checked: 3,
            notifications_sent: 1,
            ..Default::default()
        });
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].value, "3");
        assert_eq!(rows[1].value, "1");
    }
}
