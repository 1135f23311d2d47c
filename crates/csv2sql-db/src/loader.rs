//! Truncate and chunked append against the target table.

use sqlx::mysql::{MySql, MySqlArguments, MySqlPool};
use sqlx::query::Query;
use tracing::{debug, info};

use csv2sql_model::{Field, RecordSet};

use crate::error::DbError;
use crate::sql::{build_insert, qualified_table};

/// Writes rows into one target table.
#[derive(Debug, Clone)]
pub struct TableLoader {
    pool: MySqlPool,
    database: String,
}

impl TableLoader {
    pub fn new(pool: MySqlPool, database: impl Into<String>) -> Self {
        Self {
            pool,
            database: database.into(),
        }
    }

    /// Empty the table. The orchestrator calls this at most once per batch,
    /// before the first file's rows, and only after confirming the table
    /// exists.
    pub async fn truncate(&self, table: &str) -> Result<(), DbError> {
        let target = qualified_table(&self.database, table)?;
        sqlx::query(&format!("TRUNCATE TABLE {target}"))
            .execute(&self.pool)
            .await?;
        info!(table, "table truncated");
        Ok(())
    }

    /// Insert all rows, in order, split into sequential statements of at
    /// most `chunk_size` rows (one statement when unset). Every cell is a
    /// bind parameter. There is no cross-chunk rollback: a failure aborts
    /// the remaining chunks and leaves prior ones in place.
    pub async fn append(
        &self,
        table: &str,
        record_set: &RecordSet,
        chunk_size: Option<usize>,
    ) -> Result<u64, DbError> {
        if record_set.height() == 0 {
            info!(table, "record set is empty, nothing to insert");
            return Ok(0);
        }
        let target = qualified_table(&self.database, table)?;
        let chunk = chunk_size
            .filter(|&n| n > 0)
            .unwrap_or_else(|| record_set.height());

        let mut total = 0u64;
        for rows in record_set.rows().chunks(chunk) {
            let sql = build_insert(&target, record_set.columns(), rows.len())?;
            let mut query = sqlx::query(&sql);
            for row in rows {
                for field in row {
                    query = bind_field(query, field);
                }
            }
            let result = query.execute(&self.pool).await?;
            total += result.rows_affected();
            debug!(table, rows = rows.len(), "chunk inserted");
        }
        info!(table, rows = total, "rows inserted");
        Ok(total)
    }
}

fn bind_field<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    field: &'q Field,
) -> Query<'q, MySql, MySqlArguments> {
    match field {
        Field::Text(s) => query.bind(s.as_str()),
        Field::Integer(i) => query.bind(*i),
        Field::Float(f) => query.bind(*f),
        Field::Null => query.bind(Option::<String>::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::build_insert;

    fn record_set(rows: usize) -> RecordSet {
        let mut rs = RecordSet::new(vec!["name".into(), "email".into()]);
        for i in 0..rows {
            rs.push_row(vec![
                Field::Text(format!("user{i}")),
                Field::Text(format!("user{i}@x.com")),
            ])
            .unwrap();
        }
        rs
    }

    #[test]
    fn chunking_preserves_order_and_total_count() {
        let rs = record_set(10);
        let rejoined: Vec<_> = rs.rows().chunks(3).flatten().cloned().collect();
        assert_eq!(rejoined.as_slice(), rs.rows());
        let sizes: Vec<usize> = rs.rows().chunks(3).map(<[_]>::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);
    }

    #[test]
    fn statement_shape_matches_chunk_sizes() {
        let rs = record_set(5);
        for rows in rs.rows().chunks(2) {
            let sql = build_insert("`db`.`t`", rs.columns(), rows.len()).unwrap();
            let placeholders = sql.matches('?').count();
            assert_eq!(placeholders, rows.len() * rs.width());
        }
    }
}
