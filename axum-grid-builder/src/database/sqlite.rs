//! SQLite schema provider implementation

use crate::database::traits::{DatabaseError, SchemaProvider};
use crate::schema::ColumnInfo;
use async_trait::async_trait;
use sqlx::{Column, Executor, Row, SqlitePool, TypeInfo};

/// SQLite schema provider
///
/// SQLite has no schema namespaces, so the schema argument of
/// [`SchemaProvider::table_columns`] is ignored.
pub struct SqliteProvider {
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Create a new SQLite provider
    ///
    /// # Arguments
    ///
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Quote an identifier to prevent SQL injection
    ///
    /// SQLite uses double quotes for identifiers. This function escapes any
    /// double quotes in the identifier by doubling them.
    fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }
}

#[async_trait]
impl SchemaProvider for SqliteProvider {
    async fn table_columns(
        &self,
        _schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnInfo>, DatabaseError> {
        let table_info_query = format!("PRAGMA table_info({})", Self::quote_identifier(table));
        let rows = sqlx::query(&table_info_query)
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Err(DatabaseError::TableNotFound(table.to_string()));
        }

        let columns = rows
            .iter()
            .map(|row| {
                // PRAGMA table_info returns: cid, name, type, notnull, dflt_value, pk
                let column_name: String = row.try_get("name")?;
                let data_type: String = row.try_get("type")?;
                let not_null: i32 = row.try_get("notnull")?;

                Ok(ColumnInfo::new(
                    table,
                    column_name,
                    data_type,
                    None,
                    not_null == 0,
                ))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(columns)
    }

    async fn query_columns(&self, sql: &str) -> Result<Vec<ColumnInfo>, DatabaseError> {
        let mut connection = self.pool.acquire().await?;
        let describe = connection
            .describe(sql)
            .await
            .map_err(|error| DatabaseError::Describe(error.to_string()))?;

        let columns = describe
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                ColumnInfo::new(
                    String::new(),
                    column.name(),
                    column.type_info().name(),
                    None,
                    describe.nullable(index).unwrap_or(true),
                )
            })
            .collect();

        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typemap::GridDataType;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn pool_with_orders() -> SqlitePool {
        // A single connection keeps the in-memory database alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE orders (
                id INTEGER PRIMARY KEY,
                customer TEXT NOT NULL,
                total REAL NOT NULL,
                placed_at DATETIME
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[test]
    fn quote_identifier_escapes_quotes() {
        assert_eq!(SqliteProvider::quote_identifier("orders"), "\"orders\"");
        assert_eq!(
            SqliteProvider::quote_identifier("or\"ders"),
            "\"or\"\"ders\""
        );
    }

    #[tokio::test]
    async fn table_columns_reports_types_in_order() {
        let provider = SqliteProvider::new(pool_with_orders().await);

        let columns = provider.table_columns("main", "orders").await.unwrap();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].column_name, "id");
        assert_eq!(columns[1].column_name, "customer");
        assert!(!columns[1].nullable);
        assert_eq!(columns[3].grid_data_type, GridDataType::Date);
    }

    #[tokio::test]
    async fn unknown_table_is_not_found() {
        let provider = SqliteProvider::new(pool_with_orders().await);

        let error = provider.table_columns("main", "missing").await.unwrap_err();
        assert!(matches!(error, DatabaseError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn query_columns_describes_result_set() {
        let provider = SqliteProvider::new(pool_with_orders().await);

        let columns = provider
            .query_columns("SELECT customer, total FROM orders")
            .await
            .unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].column_name, "customer");
        assert!(columns[0].table_name.is_empty());
    }

    #[tokio::test]
    async fn invalid_query_fails_describe() {
        let provider = SqliteProvider::new(pool_with_orders().await);

        let error = provider
            .query_columns("SELECT FROM nowhere")
            .await
            .unwrap_err();
        assert!(matches!(error, DatabaseError::Describe(_)));
    }
}
