//! SQL-type-to-grid-type mapping

use serde::{Deserialize, Serialize};

/// Display type a grid column is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridDataType {
    String,
    Number,
    Date,
    Time,
    Boolean,
    Unsupported,
}

/// Map a SQL column type name to its grid display type
///
/// Matching is case-insensitive and total: anything unrecognized falls back
/// to [`GridDataType::String`]. Type names are matched verbatim, so a
/// parameterized name like `varchar(255)` takes the fallback.
pub fn map_sql_data_type(data_type: &str) -> GridDataType {
    match data_type.to_ascii_uppercase().as_str() {
        "CHAR" | "VARCHAR" | "NVARCHAR" | "NCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT"
        | "LONGTEXT" | "ENUM" | "SET" | "JSON" => GridDataType::String,
        "INT" | "SMALLINT" | "TINYINT" | "MEDIUMINT" | "BIGINT" | "FLOAT" | "DOUBLE"
        | "DECIMAL" | "MONEY" | "REAL" => GridDataType::Number,
        "DATE" | "DATETIME" | "TIMESTAMP" => GridDataType::Date,
        "TIME" => GridDataType::Time,
        // BIT is also listed with the binary types upstream, but the boolean
        // branch comes first and wins, so it stays a boolean here.
        "BOOLEAN" | "BIT" => GridDataType::Boolean,
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "GEOMETRY"
        | "POINT" | "LINESTRING" | "POLYGON" => GridDataType::Unsupported,
        _ => GridDataType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_string_types() {
        assert_eq!(map_sql_data_type("varchar"), GridDataType::String);
        assert_eq!(map_sql_data_type("NVARCHAR"), GridDataType::String);
        assert_eq!(map_sql_data_type("json"), GridDataType::String);
    }

    #[test]
    fn maps_number_types() {
        assert_eq!(map_sql_data_type("INT"), GridDataType::Number);
        assert_eq!(map_sql_data_type("decimal"), GridDataType::Number);
        assert_eq!(map_sql_data_type("Money"), GridDataType::Number);
    }

    #[test]
    fn maps_temporal_types() {
        assert_eq!(map_sql_data_type("datetime"), GridDataType::Date);
        assert_eq!(map_sql_data_type("TIMESTAMP"), GridDataType::Date);
        assert_eq!(map_sql_data_type("time"), GridDataType::Time);
    }

    #[test]
    fn bit_is_boolean() {
        assert_eq!(map_sql_data_type("bit"), GridDataType::Boolean);
        assert_eq!(map_sql_data_type("BOOLEAN"), GridDataType::Boolean);
    }

    #[test]
    fn maps_binary_types_to_unsupported() {
        assert_eq!(map_sql_data_type("blob"), GridDataType::Unsupported);
        assert_eq!(map_sql_data_type("VARBINARY"), GridDataType::Unsupported);
        assert_eq!(map_sql_data_type("geometry"), GridDataType::Unsupported);
    }

    #[test]
    fn unknown_types_default_to_string() {
        assert_eq!(map_sql_data_type("unknown_type"), GridDataType::String);
        assert_eq!(map_sql_data_type(""), GridDataType::String);
        assert_eq!(map_sql_data_type("varchar(255)"), GridDataType::String);
    }
}
