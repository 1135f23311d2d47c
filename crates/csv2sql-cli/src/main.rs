//! csv2sql CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use csv2sql_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod config;
mod pipeline;
mod summary;
mod types;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::config::{load_env_file, load_mapping, load_type_hints, resolve_connect_params};
use crate::pipeline::{ImportOptions, ImportRequest, run_import};
use crate::summary::print_summary;
use crate::types::BatchResult;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    // Failed files are reported in the summary and still exit 0; only
    // run-level fatal conditions exit non-zero.
    let exit_code = match run(cli) {
        Ok(result) => {
            print_summary(&result);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Resolve every batch dependency up front, then run the import. Any error
/// returned here is fatal for the whole run.
fn run(cli: Cli) -> Result<BatchResult> {
    let chunk_size = match cli.chunk_size {
        Some(n) if n <= 0 => bail!("--chunk-size must be a positive integer, got {n}"),
        Some(n) => Some(n as usize),
        None => None,
    };
    if !cli.sep.is_ascii() {
        bail!("--sep must be an ASCII character");
    }

    let encoding = csv2sql_ingest::resolve_encoding(&cli.encoding)?;
    let rules = csv2sql_model::parse_rules(cli.validate_fields.as_deref().unwrap_or_default())
        .context("parse --validate-fields")?;
    let mapping = cli.map.as_deref().map(load_mapping).transpose()?;
    let hints = cli.dtypes.as_deref().map(load_type_hints).transpose()?;
    load_env_file(cli.conf.as_deref())?;
    let params = resolve_connect_params(cli.database.as_deref())?;

    let table = match cli.table.clone() {
        Some(table) => table,
        None => default_table_name(&cli.csv[0])?,
    };
    tracing::info!(table = %table, files = cli.csv.len(), "starting import");

    let request = ImportRequest {
        files: cli.csv.clone(),
        mapping,
        hints,
        rules,
        options: ImportOptions {
            table,
            truncate: cli.truncate,
            force: cli.force,
            dry_run: cli.dry_run,
            skip_header: cli.skip_header,
            no_header: cli.no_header,
            separator: cli.sep as u8,
            encoding,
            chunk_size,
        },
    };

    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
    runtime.block_on(run_import(&params, &request))
}

/// Default the target table to the first file's name without extension.
fn default_table_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a table name from '{}'", path.display()))
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = (!cli.no_log_file).then(|| cli.log_file.clone());
    // The file sink never carries ANSI codes, so only stderr matters here.
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
}
