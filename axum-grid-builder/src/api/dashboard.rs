//! Dashboard document endpoint

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::api::entry_columns;
use crate::dashboard::build_grid_dashboard;
use crate::database::traits::{DatabaseError, SchemaProvider};
use crate::layer::GridBuilderState;

/// Handler for GET /dashboard/:name
///
/// Resolves the identifier against the allow-list, discovers the columns of
/// the table or query behind it, and returns the assembled grid dashboard
/// document.
///
/// # Returns
///
/// 200 with the serialized document, 404 when the identifier is not
/// allow-listed or yields no columns, 500 on database failure
pub async fn get_dashboard_handler<DB: SchemaProvider>(
    State(state): State<GridBuilderState<DB>>,
    Path(name): Path<String>,
) -> Response {
    let Some(entry) = state.cache.find(&name) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Table or query '{}' not found.", name),
        );
    };

    let columns = match entry_columns(state.provider.as_ref(), &entry).await {
        Ok(columns) => columns,
        Err(DatabaseError::TableNotFound(_)) => {
            return error_response(
                StatusCode::NOT_FOUND,
                format!("Table or query '{}' not found.", name),
            );
        }
        Err(error) => {
            tracing::error!(%error, entry = %entry.name, "failed to discover columns");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string());
        }
    };

    if columns.is_empty() {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("'{}' returned no columns.", name),
        );
    }

    let document = build_grid_dashboard(&state.settings, &entry, &columns);
    (StatusCode::OK, Json(document)).into_response()
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message
        })),
    )
        .into_response()
}
