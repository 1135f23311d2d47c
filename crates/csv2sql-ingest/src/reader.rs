//! Delimited file reading into a [`RecordSet`].

use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::Encoding;
use tracing::debug;

use csv2sql_model::{Field, RecordSet, TypeHint, TypeHints};

use crate::decode::decode_with_fallback;
use crate::error::IngestError;

/// How to read one input file.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions<'a> {
    /// Field separator byte.
    pub separator: u8,
    /// Declared encoding; Latin-1 is retried on failure.
    pub encoding: &'static Encoding,
    /// Whether the first (post-skip) row is a header.
    pub has_header: bool,
    /// Column names for no-header mode, bound to rows positionally.
    pub columns: Option<&'a [String]>,
    /// Per-column type hints.
    pub hints: Option<&'a TypeHints>,
    /// Leading rows to drop before the header (or data) starts.
    pub skip_rows: usize,
}

/// Read one delimited file into a record set.
pub fn read_record_set(path: &Path, options: &ParseOptions<'_>) -> Result<RecordSet, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_with_fallback(path, &bytes, options.encoding)?;
    let text = skip_lines(&text, options.skip_rows);

    let mut reader = ReaderBuilder::new()
        .delimiter(options.separator)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let columns: Vec<String> = if options.has_header {
        let header = match records.next() {
            Some(record) => record.map_err(|e| csv_parse_error(path, &e))?,
            None => {
                return Err(IngestError::Empty {
                    path: path.to_path_buf(),
                });
            }
        };
        header.iter().map(|h| h.trim().to_string()).collect()
    } else {
        options
            .columns
            .ok_or(IngestError::MissingColumns)?
            .to_vec()
    };

    let hint_for: Vec<Option<TypeHint>> = columns
        .iter()
        .map(|name| {
            options
                .hints
                .and_then(|hints| hints.get(name.as_str()).copied())
        })
        .collect();

    let mut record_set = RecordSet::new(columns);
    for record in records {
        let record = record.map_err(|e| csv_parse_error(path, &e))?;
        if record.len() != record_set.width() {
            return Err(IngestError::WidthMismatch {
                path: path.to_path_buf(),
                expected: record_set.width(),
                found: record.len(),
            });
        }
        let mut row = Vec::with_capacity(record_set.width());
        for (idx, value) in record.iter().enumerate() {
            row.push(typed_field(path, record_set.columns(), idx, value, hint_for[idx])?);
        }
        record_set
            .push_row(row)
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
    }

    debug!(
        path = %path.display(),
        rows = record_set.height(),
        columns = record_set.width(),
        "file parsed"
    );
    Ok(record_set)
}

fn typed_field(
    path: &Path,
    columns: &[String],
    idx: usize,
    value: &str,
    hint: Option<TypeHint>,
) -> Result<Field, IngestError> {
    if value.is_empty() {
        return Ok(Field::Null);
    }
    match hint {
        None | Some(TypeHint::Text) => Ok(Field::Text(value.to_string())),
        Some(TypeHint::Integer) => {
            value
                .trim()
                .parse::<i64>()
                .map(Field::Integer)
                .map_err(|_| IngestError::InvalidNumber {
                    path: path.to_path_buf(),
                    column: columns[idx].clone(),
                    value: value.to_string(),
                    wanted: "integer",
                })
        }
        Some(TypeHint::Float) => {
            value
                .trim()
                .parse::<f64>()
                .map(Field::Float)
                .map_err(|_| IngestError::InvalidNumber {
                    path: path.to_path_buf(),
                    column: columns[idx].clone(),
                    value: value.to_string(),
                    wanted: "float",
                })
        }
    }
}

fn csv_parse_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(idx) => rest = &rest[idx + 1..],
            None => return "",
        }
    }
    rest
}
