use std::path::PathBuf;

/// Terminal state of one file's import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Rows were inserted.
    Loaded { inserted: u64 },
    /// Dry run: validated but nothing written.
    Skipped,
    /// A stage failed; later files still ran.
    Failed { error: String },
}

/// What happened to one file of the batch.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Rows parsed from the file, when parsing got that far.
    pub rows_parsed: Option<usize>,
    /// Rows remaining after field validation.
    pub rows_validated: Option<usize>,
    pub outcome: FileOutcome,
}

/// Result of a whole batch run against one table.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub database: String,
    pub table: String,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl BatchResult {
    pub fn loaded_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Loaded { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
            .count()
    }

    pub fn total_inserted(&self) -> u64 {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Loaded { inserted } => inserted,
                _ => 0,
            })
            .sum()
    }
}
