//! Error types for file parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading one input file.
///
/// All of these abort the current file only; the batch continues. The one
/// exception is [`IngestError::UnknownEncoding`], which the orchestrator
/// resolves once up front and treats as fatal configuration.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The declared encoding label names no known encoding.
    #[error("unknown encoding label '{0}'")]
    UnknownEncoding(String),

    /// Failed to read the file from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither the declared encoding nor the Latin-1 fallback could decode
    /// the content.
    #[error("failed to decode {path} with '{encoding}' or the Latin-1 fallback")]
    Decode { path: PathBuf, encoding: String },

    /// Structurally malformed content (ragged rows, bad quoting).
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The file holds no header row and no data.
    #[error("file is empty: {path}")]
    Empty { path: PathBuf },

    /// In no-header mode, the rows do not match the supplied column count.
    #[error("{path}: rows carry {found} fields but {expected} columns were supplied")]
    WidthMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// A cell under a numeric type hint did not parse.
    #[error("{path}: column '{column}' value '{value}' is not a valid {wanted}")]
    InvalidNumber {
        path: PathBuf,
        column: String,
        value: String,
        wanted: &'static str,
    },

    /// No-header mode requires caller-supplied column names.
    #[error("no-header mode requires explicit column names")]
    MissingColumns,
}
