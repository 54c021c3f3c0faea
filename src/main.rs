//! Stride Server: inactivity reminders for runners
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use stride_core::config::AppConfig;
use stride_core::error::AppError;
use stride_worker::CronScheduler;
use stride_worker::scheduler::run_scheduled_sweep;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration for `STRIDE_ENV` from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("STRIDE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Stride v{}", env!("CARGO_PKG_VERSION"));
    let config = Arc::new(config);

    // ── Step 1: Connect the data store ───────────────────────────
    let store = stride_store::connect(&config).await?;
    match store.health_check().await {
        Ok(true) => tracing::info!("Store '{}' is reachable", store.provider_type()),
        Ok(false) => tracing::warn!("Store '{}' reported unhealthy", store.provider_type()),
        Err(e) => tracing::warn!("Store health check failed: {e}"),
    }

    let app_state = stride_api::AppState::new(Arc::clone(&config), store);

    // ── Step 2: Cron scheduler ───────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new(Arc::clone(&app_state.sweep)).await?;
        scheduler.register_sweep(&config.worker).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Cron scheduler disabled");
        None
    };

    let startup_sweep = if config.worker.run_on_startup {
        let sweep = Arc::clone(&app_state.sweep);
        Some(tokio::spawn(async move {
            run_scheduled_sweep(&sweep).await;
        }))
    } else {
        None
    };

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = stride_api::build_app(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Stride server listening on {addr}");

    // ── Step 4: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Stop background tasks ────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!("{e}");
        }
    }
    if let Some(handle) = startup_sweep {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Startup sweep still running after {}s, abandoning it", grace.as_secs());
        }
    }

    tracing::info!("Stride server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
