//! Database abstraction layer
//!
//! This module provides a database-agnostic interface for discovering the
//! columns of a table or of an ad-hoc query's result set.

pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-export the main trait
pub use traits::SchemaProvider;
