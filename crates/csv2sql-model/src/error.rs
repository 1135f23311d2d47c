use thiserror::Error;

/// Errors from record set construction and shape operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordSetError {
    /// Row width does not match the declared column count.
    #[error("row has {found} fields, record set declares {expected} columns")]
    WidthMismatch { expected: usize, found: usize },

    /// Projection or lookup referenced a column the set does not carry.
    #[error("column '{0}' not found in record set")]
    ColumnNotFound(String),
}

/// Errors from building a column mapping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The same source column appears twice in the mapping.
    #[error("duplicate source column '{0}' in mapping")]
    DuplicateSource(String),

    /// A mapping entry has an empty source or target name.
    #[error("mapping entry '{source_name}' -> '{target}' has an empty name")]
    EmptyName { source_name: String, target: String },
}

/// Errors from parsing the `field,rule;field,rule` validation spec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleParseError {
    /// A segment is missing its comma-separated `field,rule` pair.
    #[error("malformed validation entry '{0}': expected 'field,rule'")]
    MalformedEntry(String),
}

/// Errors from parsing type hint identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HintParseError {
    /// The identifier names no known type.
    #[error("unknown type hint '{0}' (expected str, int, or float)")]
    UnknownType(String),
}
