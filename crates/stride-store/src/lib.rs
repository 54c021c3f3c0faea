//! # stride-store
//!
//! The data-store seam of Stride. [`StoreProvider`] is the contract the
//! inactivity sweep consumes; this crate ships three implementations:
//!
//! - [`RestStoreProvider`] talks to the hosted project's PostgREST endpoint
//! - [`PostgresStoreProvider`] queries PostgreSQL directly through sqlx
//! - [`MemoryStoreProvider`] keeps everything in process (development, tests)

pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::connect;
pub use provider::StoreProvider;
pub use providers::memory::MemoryStoreProvider;
pub use providers::postgres::PostgresStoreProvider;
pub use providers::rest::RestStoreProvider;
