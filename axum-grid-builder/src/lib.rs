//! # axum-grid-builder
//!
//! Builds declarative grid dashboard documents from allow-listed SQL tables
//! and named queries, easily integrable as an Axum layer.
//!
//! ## Features
//!
//! - Allow-list of queryable tables and named queries, loaded from a JSON
//!   file and cached with time-based invalidation
//! - Column discovery through INFORMATION_SCHEMA (or a prepare-only describe
//!   for ad-hoc queries)
//! - SQL-type-to-display-type mapping for grid rendering
//! - Assembly of a serializable grid dashboard document
//! - Support for SQLite and PostgreSQL
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use axum_grid_builder::{DataSourceSettings, GridBuilderLayer};
//! use sqlx::SqlitePool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = SqlitePool::connect("sqlite::memory:")
//!         .await
//!         .unwrap();
//!
//!     let settings = DataSourceSettings::from_env()
//!         .expect("database settings must be configured");
//!
//!     let app = Router::new()
//!         .route("/", get(|| async { "Hello, World!" }))
//!         .merge(
//!             GridBuilderLayer::sqlite("/grid", pool, "schemas/allowed_tables.json", settings)
//!                 .into_router(),
//!         );
//!
//!     // Serve the application...
//! }
//! ```

// Public modules
pub mod allowlist;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod layer;
pub mod schema;
pub mod typemap;

// Public exports
pub use allowlist::{AllowListCache, EntryKind, TableEntry};
pub use config::DataSourceSettings;
pub use dashboard::{build_grid_dashboard, DashboardDocument};
pub use layer::GridBuilderLayer;
pub use schema::ColumnInfo;
pub use typemap::{map_sql_data_type, GridDataType};

// Re-export database providers
pub use database::traits::SchemaProvider;

#[cfg(feature = "sqlite")]
pub use database::sqlite::SqliteProvider;

#[cfg(feature = "postgres")]
pub use database::postgres::PostgresProvider;
