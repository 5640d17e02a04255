//! GridBuilderLayer - Main Axum integration layer
//!
//! This module provides the main entry point for integrating
//! axum-grid-builder into an Axum application.

use crate::allowlist::AllowListCache;
use crate::config::DataSourceSettings;
use crate::database::traits::SchemaProvider;
use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[cfg(feature = "sqlite")]
use crate::database::sqlite::SqliteProvider;

#[cfg(feature = "postgres")]
use crate::database::postgres::PostgresProvider;

use crate::api::{get_dashboard_handler, get_table_columns_handler, list_tables_handler};

/// Shared state handed to all handlers
pub struct GridBuilderState<DB> {
    /// Schema provider for column discovery
    pub provider: Arc<DB>,

    /// Allow-list cache, one instance per process
    pub cache: Arc<AllowListCache>,

    /// Connection details embedded in built documents
    pub settings: DataSourceSettings,
}

impl<DB> Clone for GridBuilderState<DB> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            cache: Arc::clone(&self.cache),
            settings: self.settings.clone(),
        }
    }
}

/// Main layer for integrating the grid builder into an Axum application
///
/// # Example
///
/// ```rust,no_run
/// use axum::Router;
/// use axum_grid_builder::{DataSourceSettings, GridBuilderLayer};
/// use sqlx::SqlitePool;
///
/// # async fn example() {
/// let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
/// let settings = DataSourceSettings::from_env().unwrap();
/// let builder = GridBuilderLayer::sqlite("/grid", pool, "schemas/allowed_tables.json", settings);
/// let app = Router::new().merge(builder.into_router());
/// # }
/// ```
pub struct GridBuilderLayer<DB: SchemaProvider> {
    base_path: String,
    state: GridBuilderState<DB>,
}

impl<DB: SchemaProvider> GridBuilderLayer<DB> {
    /// Create a new grid builder at the given base path
    ///
    /// # Arguments
    ///
    /// * `base_path` - URL path the endpoints are mounted under (e.g. "/grid")
    /// * `provider` - Schema provider implementation
    /// * `allow_list_path` - Path of the allow-list JSON file
    /// * `settings` - Connection details for built documents
    pub fn new(
        base_path: impl Into<String>,
        provider: DB,
        allow_list_path: impl AsRef<Path>,
        settings: DataSourceSettings,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            state: GridBuilderState {
                provider: Arc::new(provider),
                cache: Arc::new(AllowListCache::from_path(allow_list_path.as_ref())),
                settings,
            },
        }
    }

    /// Convert into an Axum Router that can be merged
    ///
    /// The returned router includes:
    /// - `GET {base_path}/tables` - the allow-list
    /// - `GET {base_path}/tables/{name}/columns` - column metadata
    /// - `GET {base_path}/dashboard/{name}` - the assembled document
    /// - Permissive CORS middleware
    pub fn into_router(self) -> Router {
        // Note: Axum 0.8 uses {param} syntax instead of :param
        let api_router = Router::new()
            .route("/tables", get(list_tables_handler::<DB>))
            .route(
                "/tables/{name}/columns",
                get(get_table_columns_handler::<DB>),
            )
            .route("/dashboard/{name}", get(get_dashboard_handler::<DB>))
            .with_state(self.state);

        Router::new()
            .nest(&self.base_path, api_router)
            .layer(CorsLayer::permissive())
    }
}

#[cfg(feature = "sqlite")]
impl GridBuilderLayer<SqliteProvider> {
    /// Create a new grid builder for SQLite
    pub fn sqlite(
        base_path: impl Into<String>,
        pool: sqlx::SqlitePool,
        allow_list_path: impl AsRef<Path>,
        settings: DataSourceSettings,
    ) -> Self {
        Self::new(base_path, SqliteProvider::new(pool), allow_list_path, settings)
    }
}

#[cfg(feature = "postgres")]
impl GridBuilderLayer<PostgresProvider> {
    /// Create a new grid builder for PostgreSQL
    pub fn postgres(
        base_path: impl Into<String>,
        pool: sqlx::PgPool,
        allow_list_path: impl AsRef<Path>,
        settings: DataSourceSettings,
    ) -> Self {
        Self::new(
            base_path,
            PostgresProvider::new(pool),
            allow_list_path,
            settings,
        )
    }
}
