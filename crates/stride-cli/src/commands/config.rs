//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use stride_core::config::mask_password;
use stride_core::error::AppError;

use crate::output::{self, OutputFormat, Row};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_env: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_env)?.redacted();
            let rows = vec![
                Row::new("Server", format!("{}:{}", config.server.host, config.server.port)),
                Row::new("Store backend", config.store.backend),
                Row::new("Store URL", &config.store.url),
                Row::new("Store key", &config.store.service_key),
                Row::new("Database", &config.database.url),
                Row::new("Threshold (days)", config.sweep.inactivity_threshold_days),
                Row::new("Cooldown (days)", config.sweep.cooldown_days),
                Row::new("Concurrency", config.sweep.concurrency),
                Row::new(
                    "Scheduler",
                    if config.worker.enabled {
                        config.worker.schedule.as_str()
                    } else {
                        "disabled"
                    },
                ),
                Row::new("Log level", &config.logging.level),
            ];
            output::print_record(&config, rows, format);
        }
        ConfigCommand::Validate => {
            let config = super::load_config(config_env)?;
            output::print_success(&format!("Configuration '{config_env}' is valid"));
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Store: {}", config.store.backend);
            println!("  Database: {}", mask_password(&config.database.url));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_returns_load_error_unchanged() {
        let args = ConfigArgs {
            command: ConfigCommand::Validate,
        };
        let env = "no-such-environment";

        match (
            execute(&args, env, OutputFormat::Table),
            super::super::load_config(env),
        ) {
            (Err(e), Err(expected)) => assert_eq!(e.message, expected.message),
            (Ok(()), Ok(_)) => {}
            (got, expected) => panic!(
                "validate ok={} but load ok={}",
                got.is_ok(),
                expected.is_ok()
            ),
        }
    }
}
