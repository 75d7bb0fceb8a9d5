//! # gatehouse-entity
//!
//! Domain entity models for Gatehouse. Every struct in this crate
//! represents a database table row or a value object used to query one.
//! Database entities derive `sqlx::FromRow`.

pub mod user;
