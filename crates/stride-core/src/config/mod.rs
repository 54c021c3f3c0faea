//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `STRIDE__*` environment variables. Each sub-module
//! represents a logical configuration section.

pub mod app;
pub mod database;
pub mod logging;
pub mod store;
pub mod sweep;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{StoreBackend, StoreConfig};
pub use self::sweep::SweepConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Environment variable carrying the hosted store endpoint.
pub const STORE_URL_ENV: &str = "SUPABASE_URL";

/// Environment variable carrying the privileged store credential.
pub const STORE_KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Data store selection and credentials.
    #[serde(default)]
    pub store: StoreConfig,
    /// Direct PostgreSQL connection settings (postgres backend only).
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Inactivity sweep policy.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// In-process scheduler settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml`, environment
    /// variables prefixed with `STRIDE__`, and finally the hosted store's
    /// own `SUPABASE_URL` / `SUPABASE_SERVICE_ROLE_KEY` variables.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STRIDE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("store.url", std::env::var(STORE_URL_ENV).ok())?
            .set_override_option("store.service_key", std::env::var(STORE_KEY_ENV).ok())?;

        let config: Self = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML document without touching the
    /// filesystem or environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Check that the selected store backend has everything it needs.
    ///
    /// A missing endpoint or credential is a fatal startup condition.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.store.backend {
            StoreBackend::Rest => {
                if self.store.url.trim().is_empty() {
                    return Err(AppError::configuration(format!(
                        "Store endpoint is not configured (set {STORE_URL_ENV} or STRIDE__STORE__URL)"
                    )));
                }
                if self.store.service_key.trim().is_empty() {
                    return Err(AppError::configuration(format!(
                        "Store credential is not configured (set {STORE_KEY_ENV} or STRIDE__STORE__SERVICE_KEY)"
                    )));
                }
            }
            StoreBackend::Postgres => {
                if self.database.url.trim().is_empty() {
                    return Err(AppError::configuration(
                        "Database URL is not configured (set STRIDE__DATABASE__URL)",
                    ));
                }
            }
            StoreBackend::Memory => {}
        }

        self.sweep.validate()?;
        Ok(())
    }

    /// Return a copy that is safe to print: the store credential is
    /// replaced and the database password is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.store.service_key.is_empty() {
            copy.store.service_key = "****".to_string();
        }
        copy.database.url = mask_password(&copy.database.url);
        copy
    }
}

/// Mask the password portion of a connection URL for safe logging.
pub fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
