//! Concrete store providers.

pub mod memory;
pub mod postgres;
pub mod rest;
