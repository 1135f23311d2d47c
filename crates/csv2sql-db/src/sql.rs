//! SQL text building for statements whose identifiers cannot be bound.
//!
//! Catalog lookups are fully parameterized; only `TRUNCATE` and `INSERT`
//! need identifiers spliced into the statement, and those go through
//! [`quote_identifier`]. Values are always bind parameters, never text.

use crate::error::DbError;

/// Backtick-quote a MySQL identifier, doubling embedded backticks.
pub fn quote_identifier(name: &str) -> Result<String, DbError> {
    if name.trim().is_empty() {
        return Err(DbError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("`{}`", name.replace('`', "``")))
}

/// `` `database`.`table` ``
pub fn qualified_table(database: &str, table: &str) -> Result<String, DbError> {
    Ok(format!(
        "{}.{}",
        quote_identifier(database)?,
        quote_identifier(table)?
    ))
}

/// Multi-row insert statement with one `?` placeholder per cell.
pub fn build_insert(target: &str, columns: &[String], rows: usize) -> Result<String, DbError> {
    if columns.is_empty() {
        return Err(DbError::NoColumns);
    }
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");
    let row_placeholders = format!("({})", vec!["?"; columns.len()].join(", "));
    let values = vec![row_placeholders; rows.max(1)].join(", ");
    Ok(format!(
        "INSERT INTO {target} ({column_list}) VALUES {values}"
    ))
}
