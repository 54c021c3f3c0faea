//! Database migration management commands.

use clap::{Args, Subcommand};

use stride_core::config::StoreBackend;
use stride_core::error::AppError;
use stride_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_env: &str) -> Result<(), AppError> {
    let config = super::load_config(config_env)?;
    if config.store.backend != StoreBackend::Postgres {
        return Err(AppError::configuration(format!(
            "Migrations apply to the postgres backend only (store.backend is '{}')",
            config.store.backend
        )));
    }

    match &args.command {
        MigrateCommand::Run => {
            let pool = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            stride_database::migration::run_migrations(pool.pool()).await?;
            pool.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
