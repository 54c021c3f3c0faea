//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod sweep;

use clap::{Parser, Subcommand};

use stride_core::config::AppConfig;
use stride_core::error::AppError;

use crate::output::OutputFormat;

/// Stride: inactivity reminders for runners
#[derive(Debug, Parser)]
#[command(name = "stride", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (merges config/default.toml and config/<ENV>.toml)
    #[arg(short, long, default_value = "development")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one inactivity sweep now
    Sweep(sweep::SweepArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Sweep(args) => sweep::execute(args, &self.config, self.format).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load and validate configuration for an environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sweep_with_json_output() {
        let cli = Cli::try_parse_from(["stride", "-c", "production", "-f", "json", "sweep"]).unwrap();
        assert_eq!(cli.config, "production");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Sweep(_)));
    }

    #[test]
    fn test_parse_nested_subcommands() {
        let cli = Cli::try_parse_from(["stride", "migrate", "run"]).unwrap();
        assert!(matches!(cli.command, Commands::Migrate(_)));
        assert_eq!(cli.config, "development");

        let cli = Cli::try_parse_from(["stride", "config", "validate"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["stride", "serve"]).is_err());
    }
}
