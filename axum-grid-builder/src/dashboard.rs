//! Grid dashboard document assembly
//!
//! Builds the serializable document a dashboard renderer consumes: a data
//! source item carrying typed fields, and a single grid visualization bound
//! to it. The renderer itself is an external component; this module only
//! produces its input document.

use crate::allowlist::{EntryKind, TableEntry};
use crate::config::DataSourceSettings;
use crate::schema::ColumnInfo;
use crate::typemap::GridDataType;
use serde::Serialize;

/// Field type understood by the grid renderer
///
/// Coarser than [`GridDataType`]: the renderer has no time or boolean field,
/// so those collapse onto date and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Number,
    Date,
}

/// A typed field of the data source item
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Column name the field binds to
    pub name: String,

    /// Label shown in the grid header
    pub label: String,

    /// Renderer field type
    pub kind: FieldKind,
}

impl Field {
    /// Map a discovered column onto a renderer field
    pub fn from_column(column: &ColumnInfo) -> Self {
        let kind = match column.grid_data_type {
            GridDataType::Number => FieldKind::Number,
            GridDataType::Date | GridDataType::Time => FieldKind::Date,
            // No boolean field in the renderer, shown as text
            GridDataType::Boolean => FieldKind::Text,
            GridDataType::String | GridDataType::Unsupported => FieldKind::Text,
        };

        Self {
            name: column.column_name.clone(),
            label: column.column_name.clone(),
            kind,
        }
    }
}

/// The data source item a visualization binds to
///
/// Table entries reference the table by name; query entries carry the stored
/// query text instead, so the renderer never attempts a table lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceItem {
    /// Item identifier; query items reuse the entry name so data source
    /// rewriting can find the stored query again
    pub id: String,

    /// Item title
    pub title: String,

    /// Item subtitle
    pub subtitle: String,

    /// Database host the renderer connects to
    pub host: String,

    /// Database name
    pub database: String,

    /// Table reference, absent for query items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// Stored query text, present only for query items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_query: Option<String>,

    /// Typed fields of the result set
    pub fields: Vec<Field>,
}

/// Grid display settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    pub font_size: String,
    pub page_size: u32,
    pub is_paging_enabled: bool,
    pub is_first_column_fixed: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            font_size: "small".to_string(),
            page_size: 30,
            is_paging_enabled: true,
            is_first_column_fixed: true,
        }
    }
}

/// A grid visualization bound to a data source item
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridVisualization {
    pub id: String,
    pub title: String,
    pub description: String,
    pub column_span: u32,
    pub row_span: u32,
    pub is_title_visible: bool,
    pub settings: GridSettings,

    /// Column names displayed by the grid
    pub columns: Vec<String>,
}

/// The complete serializable dashboard document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDocument {
    pub title: String,
    pub data_source_item: DataSourceItem,
    pub visualizations: Vec<GridVisualization>,
}

/// Assemble a grid dashboard document for a resolved allow-list entry
///
/// # Arguments
///
/// * `settings` - Connection details embedded in the data source item
/// * `entry` - Resolved allow-list entry (table or query)
/// * `columns` - Columns discovered for the entry
pub fn build_grid_dashboard(
    settings: &DataSourceSettings,
    entry: &TableEntry,
    columns: &[ColumnInfo],
) -> DashboardDocument {
    let title = entry
        .friendly_name
        .clone()
        .unwrap_or_else(|| format!("Dynamic Grid - {}", entry.name));

    let is_query = entry.kind == EntryKind::Query && entry.query.is_some();

    let data_source_item = DataSourceItem {
        id: if is_query {
            entry.name.clone()
        } else {
            "myTable".to_string()
        },
        title: title.clone(),
        subtitle: format!("Data from {}", entry.name),
        host: settings.host.clone(),
        database: settings.database.clone(),
        table: if is_query {
            None
        } else {
            Some(entry.name.clone())
        },
        custom_query: if is_query { entry.query.clone() } else { None },
        fields: columns.iter().map(Field::from_column).collect(),
    };

    let visualization = GridVisualization {
        id: if is_query {
            entry.name.clone()
        } else {
            "myGrid".to_string()
        },
        title: title.clone(),
        description: format!("Grid visualization for {}", entry.name),
        column_span: 3,
        row_span: 4,
        is_title_visible: true,
        settings: GridSettings::default(),
        columns: columns
            .iter()
            .map(|column| column.column_name.clone())
            .collect(),
    };

    DashboardDocument {
        title,
        data_source_item,
        visualizations: vec![visualization],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DataSourceSettings {
        DataSourceSettings::new("db.example.com", "northwind", "reader", "s3cret")
    }

    fn table_entry() -> TableEntry {
        TableEntry {
            schema: Some("sales".to_string()),
            name: "Orders".to_string(),
            kind: EntryKind::Table,
            friendly_name: Some("All Orders".to_string()),
            query: None,
        }
    }

    fn query_entry() -> TableEntry {
        TableEntry {
            schema: None,
            name: "TopOrders".to_string(),
            kind: EntryKind::Query,
            friendly_name: None,
            query: Some("SELECT * FROM Orders ORDER BY total DESC".to_string()),
        }
    }

    fn columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo::new("Orders", "id", "int", None, false),
            ColumnInfo::new("Orders", "customer", "varchar", Some(40), false),
            ColumnInfo::new("Orders", "placed_at", "datetime", None, true),
            ColumnInfo::new("Orders", "paid", "bit", None, true),
        ]
    }

    #[test]
    fn field_mapping_collapses_types() {
        let columns = columns();
        let fields: Vec<Field> = columns.iter().map(Field::from_column).collect();

        assert_eq!(fields[0].kind, FieldKind::Number);
        assert_eq!(fields[1].kind, FieldKind::Text);
        assert_eq!(fields[2].kind, FieldKind::Date);
        // Booleans render as text
        assert_eq!(fields[3].kind, FieldKind::Text);
    }

    #[test]
    fn table_entry_references_table() {
        let document = build_grid_dashboard(&settings(), &table_entry(), &columns());

        assert_eq!(document.title, "All Orders");
        assert_eq!(document.data_source_item.table.as_deref(), Some("Orders"));
        assert!(document.data_source_item.custom_query.is_none());
        assert_eq!(document.data_source_item.id, "myTable");
        assert_eq!(document.visualizations.len(), 1);
        assert_eq!(document.visualizations[0].columns.len(), 4);
    }

    #[test]
    fn query_entry_carries_custom_query() {
        let document = build_grid_dashboard(&settings(), &query_entry(), &columns());

        assert_eq!(document.title, "Dynamic Grid - TopOrders");
        assert!(document.data_source_item.table.is_none());
        assert_eq!(
            document.data_source_item.custom_query.as_deref(),
            Some("SELECT * FROM Orders ORDER BY total DESC")
        );
        // Query items reuse the entry name as id
        assert_eq!(document.data_source_item.id, "TopOrders");
        assert_eq!(document.visualizations[0].id, "TopOrders");
    }

    #[test]
    fn document_never_serializes_credentials() {
        let document = build_grid_dashboard(&settings(), &table_entry(), &columns());
        let json = serde_json::to_string(&document).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(!json.contains("reader"));
    }

    #[test]
    fn grid_settings_match_renderer_defaults() {
        let settings = GridSettings::default();
        assert_eq!(settings.page_size, 30);
        assert!(settings.is_paging_enabled);
        assert!(settings.is_first_column_fixed);
        assert_eq!(settings.font_size, "small");
    }
}
