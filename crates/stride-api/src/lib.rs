//! # stride-api
//!
//! HTTP API layer for Stride built on Axum.
//!
//! Exposes the inactivity sweep trigger and a health check, plus the
//! middleware (CORS, request logging) and error mapping around them.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
