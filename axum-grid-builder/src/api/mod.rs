//! REST API endpoints
//!
//! This module contains all API endpoint handlers for the grid builder.

use crate::allowlist::{EntryKind, TableEntry};
use crate::database::traits::{DatabaseError, SchemaProvider};
use crate::schema::ColumnInfo;

pub mod dashboard;
pub mod tables;

// Re-export handlers for convenience
pub use dashboard::get_dashboard_handler;
pub use tables::{get_table_columns_handler, list_tables_handler};

/// Discover the columns behind an allow-list entry
///
/// Query entries with stored text are described via the provider; everything
/// else, including query entries whose text is absent or empty, goes through
/// the table path.
pub(crate) async fn entry_columns<DB: SchemaProvider>(
    provider: &DB,
    entry: &TableEntry,
) -> Result<Vec<ColumnInfo>, DatabaseError> {
    match (entry.kind, entry.query.as_deref()) {
        (EntryKind::Query, Some(sql)) if !sql.is_empty() => provider.query_columns(sql).await,
        _ => {
            provider
                .table_columns(entry.resolved_schema(), &entry.name)
                .await
        }
    }
}
