//! Route definitions for the Stride HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{any, get},
};

use crate::handlers;
use crate::middleware::cors::{build_cors_layer, trigger_cors_headers};
use crate::state::AppState;

/// Build the router with all routes and per-route CORS handling.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(sweep_routes(&state))
        .merge(health_routes(&state));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Sweep trigger; accepts any method
fn sweep_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/check-inactive-users",
            any(handlers::sweep::check_inactive_users),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            trigger_cors_headers,
        ))
}

/// Health check
fn health_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .layer(build_cors_layer(&state.config.server.cors))
}
