//! Import orchestration.
//!
//! Batch dependencies (connection, schema, mapping, hints, rules) are
//! resolved once up front; each file then runs Parse → Reconcile →
//! ValidateFields → (TruncateIfFirst) → Load independently. A stage error
//! sends the file to `Failed` and the batch moves on; only the up-front
//! resolution can abort the whole run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;
use tracing::{Instrument, error, info, info_span};

use csv2sql_db::{ConnectParams, SchemaInspector, TableLoader, connect};
use csv2sql_ingest::{ParseOptions, read_record_set};
use csv2sql_model::{ColumnMapping, FieldRule, TableSchema, TypeHints};
use csv2sql_validate::{apply_rules, reconcile};

use crate::types::{BatchResult, FileOutcome, FileReport};

/// Batch-wide options shared by every file.
pub struct ImportOptions {
    pub table: String,
    pub truncate: bool,
    pub force: bool,
    pub dry_run: bool,
    pub skip_header: bool,
    pub no_header: bool,
    pub separator: u8,
    pub encoding: &'static Encoding,
    pub chunk_size: Option<usize>,
}

/// Everything resolved up front for one run.
pub struct ImportRequest {
    pub files: Vec<PathBuf>,
    pub mapping: Option<ColumnMapping>,
    pub hints: Option<TypeHints>,
    pub rules: Vec<FieldRule>,
    pub options: ImportOptions,
}

/// Run the whole batch. Errors returned here are run-fatal; per-file
/// failures are collected into the [`BatchResult`] instead.
pub async fn run_import(params: &ConnectParams, request: &ImportRequest) -> Result<BatchResult> {
    let pool = connect(params).await.context("connect to database")?;

    let inspector = SchemaInspector::new(pool.clone(), params.database.clone());
    if !inspector.database_exists().await {
        bail!("database '{}' does not exist", params.database);
    }

    let table = &request.options.table;
    let schema = inspector
        .columns_of(table)
        .await
        .with_context(|| format!("fetch columns of table '{table}'"))?;
    if schema.is_empty() {
        bail!(
            "table '{table}' has no columns in database '{}' (missing table?)",
            params.database
        );
    }

    let loader = TableLoader::new(pool, params.database.clone());

    let mut files = Vec::with_capacity(request.files.len());
    for (index, path) in request.files.iter().enumerate() {
        info!(
            file = index + 1,
            total = request.files.len(),
            path = %path.display(),
            "processing file"
        );
        let span = info_span!("file", path = %path.display());
        let report = import_file(path, &schema, &inspector, &loader, request, index == 0)
            .instrument(span)
            .await;
        files.push(report);
    }

    Ok(BatchResult {
        database: params.database.clone(),
        table: table.clone(),
        dry_run: request.options.dry_run,
        files,
    })
}

/// Drive one file to a terminal state, catching stage errors.
async fn import_file(
    path: &Path,
    schema: &TableSchema,
    inspector: &SchemaInspector,
    loader: &TableLoader,
    request: &ImportRequest,
    first_file: bool,
) -> FileReport {
    let mut report = FileReport {
        path: path.to_path_buf(),
        rows_parsed: None,
        rows_validated: None,
        outcome: FileOutcome::Skipped,
    };
    match import_file_stages(path, schema, inspector, loader, request, first_file, &mut report)
        .await
    {
        Ok(outcome) => report.outcome = outcome,
        Err(err) => {
            let error = format!("{err:#}");
            error!(path = %path.display(), error = %error, "file import failed");
            report.outcome = FileOutcome::Failed { error };
        }
    }
    report
}

#[allow(clippy::too_many_arguments)]
async fn import_file_stages(
    path: &Path,
    schema: &TableSchema,
    inspector: &SchemaInspector,
    loader: &TableLoader,
    request: &ImportRequest,
    first_file: bool,
    report: &mut FileReport,
) -> Result<FileOutcome> {
    let options = &request.options;

    // Parse
    if options.no_header {
        info!(columns = ?schema.columns(), "no-header mode: binding rows to table columns");
    }
    let parse_options = ParseOptions {
        separator: options.separator,
        encoding: options.encoding,
        has_header: !options.no_header,
        columns: options.no_header.then(|| schema.columns()),
        hints: request.hints.as_ref(),
        skip_rows: usize::from(options.skip_header),
    };
    let record_set = read_record_set(path, &parse_options)?;
    report.rows_parsed = Some(record_set.height());
    info!(path = %path.display(), rows = record_set.height(), "file parsed");

    // Reconcile columns
    let record_set = reconcile(record_set, request.mapping.as_ref(), schema, options.force)?;

    // Field validation
    let record_set = apply_rules(record_set, &request.rules);
    report.rows_validated = Some(record_set.height());

    // Truncate, at most once per batch
    if should_truncate(options.truncate, first_file, options.dry_run) {
        if inspector.table_exists(&options.table).await? {
            loader.truncate(&options.table).await?;
        } else {
            error!(table = %options.table, "table does not exist, truncate skipped");
        }
    }

    if options.dry_run {
        info!(
            path = %path.display(),
            rows = record_set.height(),
            "dry run: rows not inserted"
        );
        return Ok(FileOutcome::Skipped);
    }

    let inserted = loader
        .append(&options.table, &record_set, options.chunk_size)
        .await?;
    Ok(FileOutcome::Loaded { inserted })
}

/// Truncation is requested per batch, not per file: only the first file
/// triggers it, and a dry run never does.
pub(crate) fn should_truncate(requested: bool, first_file: bool, dry_run: bool) -> bool {
    requested && first_file && !dry_run
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_fires_only_for_the_first_file() {
        assert!(should_truncate(true, true, false));
        assert!(!should_truncate(true, false, false));
        assert!(!should_truncate(false, true, false));
    }

    #[test]
    fn dry_run_never_truncates() {
        assert!(!should_truncate(true, true, true));
    }
}
