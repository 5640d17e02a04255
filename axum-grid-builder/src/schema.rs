//! Wire types for column metadata
//!
//! These types describe columns discovered at runtime, either from
//! INFORMATION_SCHEMA for tables or by describing a query's result set.

use crate::typemap::{map_sql_data_type, GridDataType};
use serde::{Deserialize, Serialize};

/// Information about a single discovered column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Owning table name; empty for query result sets
    pub table_name: String,

    /// Column name
    pub column_name: String,

    /// SQL data type as reported by the database
    pub data_type: String,

    /// Maximum character length, when the type carries one
    pub max_length: Option<i32>,

    /// Whether the column allows NULL values
    pub nullable: bool,

    /// Display type the grid renders this column as
    pub grid_data_type: GridDataType,
}

impl ColumnInfo {
    /// Build a column description, deriving the grid display type from the
    /// SQL data type
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
        max_length: Option<i32>,
        nullable: bool,
    ) -> Self {
        let data_type = data_type.into();
        let grid_data_type = map_sql_data_type(&data_type);
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type,
            max_length,
            nullable,
            grid_data_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_grid_type_from_data_type() {
        let column = ColumnInfo::new("orders", "total", "decimal", None, true);
        assert_eq!(column.grid_data_type, GridDataType::Number);

        let column = ColumnInfo::new("orders", "placed_at", "datetime", None, false);
        assert_eq!(column.grid_data_type, GridDataType::Date);
    }

    #[test]
    fn serializes_camel_case() {
        let column = ColumnInfo::new("orders", "id", "int", None, false);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["columnName"], "id");
        assert_eq!(json["gridDataType"], "Number");
        assert_eq!(json["maxLength"], serde_json::Value::Null);
    }
}
