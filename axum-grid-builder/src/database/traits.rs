//! Schema provider trait
//!
//! This trait defines the interface that all database implementations must
//! provide: column discovery for tables and for ad-hoc query result sets.

use crate::schema::ColumnInfo;
use async_trait::async_trait;
use thiserror::Error;

/// Schema provider trait for column discovery
///
/// Implementations supply database-specific logic for describing allow-listed
/// tables and named queries.
#[async_trait]
pub trait SchemaProvider: Send + Sync + 'static {
    /// Discover the columns of a table
    ///
    /// # Arguments
    ///
    /// * `schema` - Schema the table lives in
    /// * `table` - Name of the table
    ///
    /// # Returns
    ///
    /// Columns in ordinal position order, or [`DatabaseError::TableNotFound`]
    /// when the table does not exist
    async fn table_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnInfo>, DatabaseError>;

    /// Describe the first result set of an ad-hoc query without fetching rows
    ///
    /// # Arguments
    ///
    /// * `sql` - Query text from an allow-list entry
    async fn query_columns(&self, sql: &str) -> Result<Vec<ColumnInfo>, DatabaseError>;
}

/// Database error type
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Generic database error
    #[error("Database error: {0}")]
    Query(String),

    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Query result set could not be described
    #[error("Failed to describe query: {0}")]
    Describe(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::Query(error.to_string())
    }
}
