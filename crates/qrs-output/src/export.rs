//! Workbook assembly: per-source intermediate files and the final aligned
//! workbook.

use std::collections::BTreeMap;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::{info, warn};

use qrs_model::bundle::SUMMARY_SHEET;
use qrs_model::{Source, StatsBundle, Table};

use crate::align::align_to_template;
use crate::blocks::append_stat_blocks;
use crate::error::Result;
use crate::sheet::write_table_at;
use crate::template::TemplateSchema;

/// One source's classified table and statistics, as collected by the
/// orchestrator.
#[derive(Debug, Clone)]
pub struct SourceResult {
    pub table: Table,
    pub stats: StatsBundle,
}

/// Write a single-sheet workbook holding the classified rows.
///
/// This is the classifier's side-effect file; the orchestrator later
/// replaces it with the full intermediate workbook.
pub fn write_classified_table(path: &Path, table: &Table, sheet: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;
    write_table_at(worksheet, table, 0)?;
    workbook.save(path)?;
    info!(path = %path.display(), rows = table.height(), "classified table saved");
    Ok(())
}

/// Write one source's intermediate workbook: the classified data sheet plus
/// the `所有统计汇总` sheet holding every statistics block.
pub fn write_intermediate_workbook(
    path: &Path,
    table: &Table,
    stats: &StatsBundle,
    data_sheet: &str,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(data_sheet)?;
    write_table_at(worksheet, table, 0)?;

    let summary = workbook.add_worksheet();
    summary.set_name(SUMMARY_SHEET)?;
    append_stat_blocks(summary, &stats.summary_blocks(), 0)?;

    workbook.save(path)?;
    info!(
        path = %path.display(),
        rows = table.height(),
        blocks = stats.block_count(),
        "intermediate workbook saved"
    );
    Ok(())
}

/// Export the final aligned workbook: one sheet per source present in
/// `results`, each holding the template-aligned data block followed by the
/// source's export statistics blocks.
///
/// Sheets whose name is missing from the template schema are skipped with a
/// warning; sources absent from `results` are skipped silently. Returns the
/// sheet names written, in order.
pub fn export_aligned_workbook(
    path: &Path,
    schema: &TemplateSchema,
    results: &BTreeMap<Source, SourceResult>,
) -> Result<Vec<String>> {
    let mut workbook = Workbook::new();
    let mut written = Vec::new();

    for source in Source::EXPORT_ORDER {
        let Some(result) = results.get(&source) else {
            continue;
        };
        let sheet_name = source.output_sheet();
        let Some(columns) = schema.columns(sheet_name) else {
            warn!(sheet = %sheet_name, "no column template for sheet, skipped");
            continue;
        };

        let aligned = align_to_template(&result.table, columns);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;
        write_table_at(worksheet, &aligned, 0)?;

        // One blank row beyond the writer's usual spacing: the data block's
        // header sits at row 0, so the first stat title lands three rows
        // under the last data row.
        let stats_start = aligned.height() as u32 + 3;
        append_stat_blocks(worksheet, &result.stats.export_blocks(), stats_start)?;

        info!(
            sheet = %sheet_name,
            rows = aligned.height(),
            columns = aligned.columns.len(),
            "aligned sheet written"
        );
        written.push(sheet_name.to_string());
    }

    if written.is_empty() {
        warn!(path = %path.display(), "no sheets to export, workbook not written");
        return Ok(written);
    }

    workbook.save(path)?;
    info!(path = %path.display(), sheets = written.len(), "final workbook saved");
    Ok(written)
}
