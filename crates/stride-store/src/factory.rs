//! Builds the configured store provider.

use std::sync::Arc;

use tracing::{info, warn};

use stride_core::config::{AppConfig, StoreBackend};
use stride_core::result::AppResult;
use stride_database::DatabasePool;
use stride_database::migration::run_migrations;

use crate::provider::StoreProvider;
use crate::providers::memory::MemoryStoreProvider;
use crate::providers::postgres::PostgresStoreProvider;
use crate::providers::rest::RestStoreProvider;

/// Connect to the store selected by `config.store.backend`.
///
/// The returned handle is meant to be built once and passed explicitly to
/// whatever needs it.
pub async fn connect(config: &AppConfig) -> AppResult<Arc<dyn StoreProvider>> {
    info!(backend = %config.store.backend, "Initializing data store");

    let provider: Arc<dyn StoreProvider> = match config.store.backend {
        StoreBackend::Rest => {
            info!(url = %config.store.url, schema = %config.store.schema, "Using hosted REST store");
            Arc::new(RestStoreProvider::new(&config.store)?)
        }
        StoreBackend::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                run_migrations(db.pool()).await?;
            }
            Arc::new(PostgresStoreProvider::new(db))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; nothing will be persisted");
            Arc::new(MemoryStoreProvider::new())
        }
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        let store = connect(&config).await.unwrap();
        assert_eq!(store.provider_type(), "memory");
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_rest_backend_does_not_touch_network() {
        let mut config = AppConfig::default();
        config.store.url = "https://project.supabase.co".to_string();
        config.store.service_key = "service-role-key".to_string();
        let store = connect(&config).await.unwrap();
        assert_eq!(store.provider_type(), "rest");
    }
}
