use thiserror::Error;

/// Errors from database access and statement building.
#[derive(Debug, Error)]
pub enum DbError {
    /// Connection, query, or execution failure from the driver.
    #[error("database error: {0}")]
    Driver(#[from] sqlx::Error),

    /// An identifier (database, table, or column name) is empty.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// Insert requested for a record set with no columns.
    #[error("cannot insert a record set with no columns")]
    NoColumns,
}
