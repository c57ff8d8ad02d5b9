//! Quarter processing pipeline with explicit stages.
//!
//! For each matched source: Ingest (read the named sheet) → Normalize
//! (source-specific dedup/ordering) → Classify (rule join + intermediate
//! save) → Statistics → intermediate workbook. The four sources share no
//! mutable state and run independently; a source that fails input
//! validation is dropped from the results with its error recorded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use qrs_ingest::{match_quarter_files, read_sheet_table};
use qrs_model::{Quarter, Source, Table};
use qrs_output::{SourceResult, write_intermediate_workbook};
use qrs_rules::RuleStore;
use qrs_stats::{StatsOptions, compute_bundle};
use qrs_transform::{
    classify_and_save, normalize_domestic_approvals, normalize_filing,
    normalize_foreign_approvals,
};

use crate::types::SourceSummary;

/// Inputs shared by the four per-source pipelines.
pub struct PipelineConfig<'a> {
    pub quarter_folder: &'a Path,
    pub year: i32,
    pub quarter: Quarter,
    /// Directory receiving the per-source intermediate workbooks.
    pub intermediate_dir: &'a Path,
    pub rules: &'a RuleStore,
}

/// Result of running all matched source pipelines for one quarter.
pub struct QuarterOutcome {
    /// Classified table and statistics per processed source.
    pub results: BTreeMap<Source, SourceResult>,
    pub summaries: Vec<SourceSummary>,
    /// Per-source failures (the run continues without those sources).
    pub errors: Vec<String>,
}

/// Run the four source pipelines over one quarter folder.
///
/// A missing quarter folder is fatal; a source with no matching file or a
/// failing one degrades to a warning/recorded error and is absent from the
/// results map.
pub fn run_quarter_pipelines(config: &PipelineConfig<'_>) -> Result<QuarterOutcome> {
    let matched = match_quarter_files(config.quarter_folder).context("match source files")?;
    info!(
        folder = %config.quarter_folder.display(),
        matched = matched.len(),
        "source files matched"
    );

    let mut results = BTreeMap::new();
    let mut summaries = Vec::new();
    let mut errors = Vec::new();

    for source in Source::ALL {
        let Some(input_file) = matched.get(&source) else {
            warn!(source = %source, "no file matched, source skipped");
            summaries.push(SourceSummary::skipped(source));
            continue;
        };

        let span = info_span!("source_pipeline", source = %source);
        let _guard = span.enter();
        let start = Instant::now();

        match run_source(source, input_file, config) {
            Ok((result, intermediate)) => {
                info!(
                    source = %source,
                    records = result.table.height(),
                    blocks = result.stats.block_count(),
                    duration_ms = start.elapsed().as_millis(),
                    "source pipeline complete"
                );
                summaries.push(SourceSummary {
                    source,
                    input_file: Some(input_file.clone()),
                    records: Some(result.table.height()),
                    stat_blocks: result.stats.block_count(),
                    target_excluded: result.stats.target_excluded_rows,
                    intermediate: Some(intermediate),
                });
                results.insert(source, result);
            }
            Err(error) => {
                warn!(source = %source, error = %format!("{error:#}"), "source pipeline failed");
                errors.push(format!("{source}: {error:#}"));
                summaries.push(SourceSummary {
                    source,
                    input_file: Some(input_file.clone()),
                    records: None,
                    stat_blocks: 0,
                    target_excluded: 0,
                    intermediate: None,
                });
            }
        }
    }

    Ok(QuarterOutcome {
        results,
        summaries,
        errors,
    })
}

/// Run one source: read → normalize → classify (+ save) → statistics →
/// intermediate workbook.
fn run_source(
    source: Source,
    input_file: &Path,
    config: &PipelineConfig<'_>,
) -> Result<(SourceResult, PathBuf)> {
    let raw = read_sheet_table(input_file, source.input_sheet())
        .with_context(|| format!("read {}", input_file.display()))?;
    info!(source = %source, rows = raw.height(), "raw table read");

    let normalized = normalize_source(source, raw, config)?;

    let intermediate = config
        .intermediate_dir
        .join(format!("{}_{}_结果.xlsx", config.quarter, source.code()));
    let classified = classify_and_save(
        normalized,
        config.rules,
        &intermediate,
        source.input_sheet(),
    )
    .with_context(|| format!("classify {source}"))?;

    let options = StatsOptions {
        disease_area: source != Source::Fda,
    };
    let stats = compute_bundle(&classified, config.rules, options);

    write_intermediate_workbook(&intermediate, &classified, &stats, source.input_sheet())
        .with_context(|| format!("write intermediate workbook for {source}"))?;

    Ok((SourceResult { table: classified, stats }, intermediate))
}

fn normalize_source(source: Source, raw: Table, config: &PipelineConfig<'_>) -> Result<Table> {
    let normalized = match source {
        Source::Ind | Source::Nda => normalize_filing(raw),
        Source::Nmpa => normalize_domestic_approvals(raw, config.year, config.quarter)
            .with_context(|| format!("normalize {source}"))?,
        Source::Fda => {
            normalize_foreign_approvals(raw).with_context(|| format!("normalize {source}"))?
        }
    };
    Ok(normalized)
}
