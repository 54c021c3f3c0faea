//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use stride_core::config::AppConfig;
use stride_store::StoreProvider;
use stride_worker::InactivitySweep;

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Data store.
    pub store: Arc<dyn StoreProvider>,
    /// The inactivity sweep run by the trigger endpoint.
    pub sweep: Arc<InactivitySweep>,
}

impl AppState {
    /// Build the state around a connected store.
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn StoreProvider>) -> Self {
        let sweep = Arc::new(InactivitySweep::new(Arc::clone(&store), &config.sweep));
        Self {
            config,
            store,
            sweep,
        }
    }
}
