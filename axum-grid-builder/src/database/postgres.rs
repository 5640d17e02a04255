//! PostgreSQL schema provider implementation

use crate::database::traits::{DatabaseError, SchemaProvider};
use crate::schema::ColumnInfo;
use async_trait::async_trait;
use sqlx::{Column, Executor, PgPool, Row, TypeInfo};

/// PostgreSQL schema provider
pub struct PostgresProvider {
    pool: PgPool,
}

impl PostgresProvider {
    /// Create a new PostgreSQL provider
    ///
    /// # Arguments
    ///
    /// * `pool` - PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaProvider for PostgresProvider {
    async fn table_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnInfo>, DatabaseError> {
        let query = r#"
            SELECT
                c.table_name,
                c.column_name,
                c.data_type,
                c.character_maximum_length,
                c.is_nullable
            FROM information_schema.columns c
            WHERE c.table_schema = $1
              AND c.table_name = $2
            ORDER BY c.ordinal_position
        "#;

        let rows = sqlx::query(query)
            .bind(schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Err(DatabaseError::TableNotFound(table.to_string()));
        }

        let columns = rows
            .iter()
            .map(|row| {
                let table_name: String = row.try_get("table_name")?;
                let column_name: String = row.try_get("column_name")?;
                let data_type: String = row.try_get("data_type")?;
                let max_length: Option<i32> = row.try_get("character_maximum_length")?;
                let is_nullable: String = row.try_get("is_nullable")?;

                Ok(ColumnInfo::new(
                    table_name,
                    column_name,
                    data_type,
                    max_length,
                    is_nullable == "YES",
                ))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(columns)
    }

    async fn query_columns(&self, sql: &str) -> Result<Vec<ColumnInfo>, DatabaseError> {
        // Prepare-only describe of the result set, the query is never run.
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
                    // Query result sets carry no table name
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
