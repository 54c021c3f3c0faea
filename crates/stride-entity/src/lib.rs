//! # stride-entity
//!
//! Domain entity models for Stride. Every struct in this crate represents
//! a table row or a projection of one. Database entities derive
//! `sqlx::FromRow` and also deserialize from the hosted store's JSON rows.

pub mod activity;
pub mod notification;
pub mod user;
