//! CLI argument definitions for the importer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csv2sql",
    version,
    about = "Bulk-load delimited files into a MySQL table",
    long_about = "Bulk-load one or more delimited files into a MySQL table.\n\n\
                  The table's live column layout is fetched up front; each file is\n\
                  parsed (with Latin-1 fallback), reconciled against the table\n\
                  (column count, mapping, existence), filtered by field rules, and\n\
                  appended in bounded-size chunks. Files are independent: one bad\n\
                  file never stops the rest of the batch."
)]
pub struct Cli {
    /// One or more delimited input files sharing one target table.
    #[arg(long = "csv", value_name = "FILE", num_args = 1.., required = true)]
    pub csv: Vec<PathBuf>,

    /// Target table name (default: first file's name without extension).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Target database name (default: the DB_NAME environment variable).
    #[arg(long = "database", value_name = "NAME")]
    pub database: Option<String>,

    /// Dotenv file with connection settings (default: ./.env, if present).
    #[arg(long = "conf", value_name = "FILE")]
    pub conf: Option<PathBuf>,

    /// JSON object mapping source column names to table column names.
    #[arg(long = "map", value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// JSON object mapping column names to type hints (str, int, float).
    #[arg(long = "dtypes", value_name = "FILE")]
    pub dtypes: Option<PathBuf>,

    /// Field validations as 'field,rule;field,rule' (e.g. 'email,notnull').
    #[arg(long = "validate-fields", value_name = "SPEC")]
    pub validate_fields: Option<String>,

    /// Field separator.
    #[arg(long = "sep", value_name = "CHAR", default_value = ";")]
    pub sep: char,

    /// Declared input encoding; Latin-1 is retried when it fails.
    #[arg(long = "encoding", value_name = "NAME", default_value = "utf-8")]
    pub encoding: String,

    /// Skip one leading line before reading the header.
    #[arg(long = "skip-header")]
    pub skip_header: bool,

    /// Files carry no header row; bind rows to the table's columns in order.
    #[arg(long = "no-header")]
    pub no_header: bool,

    /// Truncate the table before the first file of the batch is loaded.
    #[arg(long = "truncate")]
    pub truncate: bool,

    /// Downgrade column count/existence failures to warnings.
    #[arg(long = "force")]
    pub force: bool,

    /// Run every stage except truncate and insert.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Rows per insert statement (all rows in one statement when unset).
    #[arg(
        long = "chunk-size",
        value_name = "N",
        allow_hyphen_values = true
    )]
    pub chunk_size: Option<i64>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Also append logs to this file (second sink, no colors).
    #[arg(
        long = "log-file",
        value_name = "PATH",
        default_value = "import_csv.log",
        global = true
    )]
    pub log_file: PathBuf,

    /// Do not write the log file; log to the console only.
    #[arg(long = "no-log-file", global = true)]
    pub no_log_file: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
