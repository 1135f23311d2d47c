//! Schema introspection against INFORMATION_SCHEMA.
//!
//! All catalog lookups are parameterized; identifier values are bound, not
//! interpolated.

use sqlx::Row;
use sqlx::mysql::MySqlPool;
use tracing::{error, info};

use csv2sql_model::TableSchema;

use crate::error::DbError;

/// Read-only view of the target database's catalog.
#[derive(Debug, Clone)]
pub struct SchemaInspector {
    pool: MySqlPool,
    database: String,
}

impl SchemaInspector {
    pub fn new(pool: MySqlPool, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Whether the target schema exists. Query failures are reported and
    /// answered with `false`; nothing propagates past this boundary.
    pub async fn database_exists(&self) -> bool {
        let result =
            sqlx::query("SELECT SCHEMA_NAME FROM INFORMATION_SCHEMA.SCHEMATA WHERE SCHEMA_NAME = ?")
                .bind(&self.database)
                .fetch_optional(&self.pool)
                .await;
        match result {
            Ok(row) => row.is_some(),
            Err(e) => {
                error!(
                    database = %self.database,
                    error = %e,
                    "failed to check database existence"
                );
                false
            }
        }
    }

    /// Whether the table exists in the target schema. Only used to guard a
    /// truncate request.
    pub async fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        let row = sqlx::query(
            "SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?",
        )
        .bind(&self.database)
        .bind(table)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    /// All columns of the table, in catalog order. The caller treats a
    /// failure here as fatal for the run; there is no recovery path without
    /// schema knowledge.
    pub async fn columns_of(&self, table: &str) -> Result<TableSchema, DbError> {
        let rows = sqlx::query(
            "SELECT COLUMN_NAME FROM INFORMATION_SCHEMA.COLUMNS \
             WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
             ORDER BY ORDINAL_POSITION",
        )
        .bind(&self.database)
        .bind(table)
        .fetch_all(&self.pool)
        .await?;
        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(row.try_get::<String, _>(0)?);
        }
        info!(table, columns = ?columns, "table columns fetched");
        Ok(TableSchema::new(table, columns))
    }
}
