use thiserror::Error;

use csv2sql_model::RecordSetError;

/// Errors from reconciling a record set against the table schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// The file's column count differs from the table's.
    #[error("file has {found} columns but table '{table}' has {expected}")]
    ColumnCountMismatch {
        table: String,
        found: usize,
        expected: usize,
    },

    /// Mapped target columns that the table does not carry.
    #[error("mapped columns missing from table '{table}': {}", columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    /// The projection step referenced a column the record set lacks,
    /// normally a mapping source absent from the file.
    #[error(transparent)]
    Projection(#[from] RecordSetError),
}
