//! # stride-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for users, run sessions, and notifications.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
