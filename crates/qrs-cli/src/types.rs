use std::path::PathBuf;

use qrs_model::{Quarter, Source};

/// Outcome of one full quarter run.
#[derive(Debug)]
pub struct QuarterRunResult {
    pub year: i32,
    pub quarter: Quarter,
    pub output_dir: PathBuf,
    pub final_workbook: Option<PathBuf>,
    pub sources: Vec<SourceSummary>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

/// Per-source outcome for the terminal summary.
#[derive(Debug)]
pub struct SourceSummary {
    pub source: Source,
    /// Matched input file; `None` when the source was absent from the folder.
    pub input_file: Option<PathBuf>,
    /// Classified row count; `None` when the source was skipped or failed.
    pub records: Option<usize>,
    /// Computed, non-empty statistics blocks.
    pub stat_blocks: usize,
    /// Rows excluded from the target statistic for having no usable data.
    pub target_excluded: usize,
    /// Intermediate workbook path when written.
    pub intermediate: Option<PathBuf>,
}

impl SourceSummary {
    pub fn skipped(source: Source) -> Self {
        Self {
            source,
            input_file: None,
            records: None,
            stat_blocks: 0,
            target_excluded: 0,
            intermediate: None,
        }
    }
}
