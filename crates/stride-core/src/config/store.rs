//! Data store configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which store implementation backs the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted PostgREST endpoint reached over HTTPS.
    #[default]
    Rest,
    /// Direct PostgreSQL connection through sqlx.
    Postgres,
    /// Process-local store, for development only.
    Memory,
}

impl StoreBackend {
    /// Return the backend name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Store selection and hosted-endpoint credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend to use.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the hosted project (e.g. `https://abc.supabase.co`).
    #[serde(default)]
    pub url: String,
    /// Privileged (service role) API key.
    #[serde(default)]
    pub service_key: String,
    /// Database schema exposed by the REST endpoint.
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            service_key: String::new(),
            schema: default_schema(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_timeout() -> u64 {
    30
}
