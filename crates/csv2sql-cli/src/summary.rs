//! Batch report printed after the run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{BatchResult, FileOutcome};

pub fn print_summary(result: &BatchResult) {
    println!("Database: {}", result.database);
    println!("Table: {}", result.table);
    if result.dry_run {
        println!("Dry run: no data was written");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Parsed"),
        header_cell("Valid"),
        header_cell("Inserted"),
    ]);
    apply_table_style(&mut table);
    for column in 2..=4 {
        if let Some(column) = table.column_mut(column) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    for file in &result.files {
        let inserted = match file.outcome {
            FileOutcome::Loaded { inserted } => inserted.to_string(),
            FileOutcome::Skipped | FileOutcome::Failed { .. } => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(file.path.display()),
            status_cell(&file.outcome),
            count_cell(file.rows_parsed),
            count_cell(file.rows_validated),
            Cell::new(inserted),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} loaded, {} failed",
            result.loaded_count(),
            result.failed_count()
        )),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(result.total_inserted()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let failures: Vec<_> = result
        .files
        .iter()
        .filter_map(|file| match &file.outcome {
            FileOutcome::Failed { error } => Some((file.path.display(), error)),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Failures:");
        for (path, error) in failures {
            eprintln!("- {path}: {error}");
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn status_cell(outcome: &FileOutcome) -> Cell {
    match outcome {
        FileOutcome::Loaded { .. } => Cell::new("loaded").fg(Color::Green),
        FileOutcome::Skipped => Cell::new("skipped").fg(Color::Yellow),
        FileOutcome::Failed { .. } => Cell::new("failed").fg(Color::Red),
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(count) => Cell::new(count),
        None => Cell::new("-"),
    }
}
