//! Allow-list and column metadata endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::api::entry_columns;
use crate::database::traits::{DatabaseError, SchemaProvider};
use crate::layer::GridBuilderState;

/// Handler for GET /tables
///
/// Serves the allow-list of queryable tables and named queries so clients
/// can present identifiers and friendly names. The cached snapshot never
/// fails; when no load ever succeeded this returns an empty list.
pub async fn list_tables_handler<DB: SchemaProvider>(
    State(state): State<GridBuilderState<DB>>,
) -> Response {
    let entries = state.cache.entries();
    (StatusCode::OK, Json((*entries).clone())).into_response()
}

/// Handler for GET /tables/:name/columns
///
/// Resolves the identifier against the allow-list and returns the discovered
/// columns, each annotated with its grid display type.
///
/// # Returns
///
/// 200 with the column list, 404 when the identifier is not allow-listed or
/// the table no longer exists, 500 on database failure
pub async fn get_table_columns_handler<DB: SchemaProvider>(
    State(state): State<GridBuilderState<DB>>,
    Path(name): Path<String>,
) -> Response {
    let Some(entry) = state.cache.find(&name) else {
        return not_found(&name);
    };

    match entry_columns(state.provider.as_ref(), &entry).await {
        Ok(columns) => (StatusCode::OK, Json(columns)).into_response(),
        Err(DatabaseError::TableNotFound(_)) => not_found(&name),
        Err(error) => {
            tracing::error!(%error, table = %name, "failed to discover columns");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": error.to_string()
                })),
            )
                .into_response()
        }
    }
}

fn not_found(name: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": format!("Table or query '{}' not found.", name)
        })),
    )
        .into_response()
}
