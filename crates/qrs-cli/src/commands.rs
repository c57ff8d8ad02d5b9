//! Command implementations.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use qrs_model::{Quarter, Source};
use qrs_output::{TemplateSchema, export_aligned_workbook};
use qrs_rules::RuleStore;

use crate::cli::QuarterArgs;
use crate::pipeline::{PipelineConfig, run_quarter_pipelines};
use crate::types::QuarterRunResult;

/// Run the full quarter pipeline and final export.
pub fn run_quarter(args: &QuarterArgs) -> Result<QuarterRunResult> {
    let quarter: Quarter = args.quarter.into();
    let span = info_span!("quarter_run", year = args.year, quarter = %quarter);
    let _guard = span.enter();

    // Configuration problems are fatal before any source work starts.
    let rules = RuleStore::load(&args.rules_config).context("load rules configuration")?;
    let schema = TemplateSchema::load(&args.template_config).context("load template schema")?;

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.quarter_folder.join("output"));
    let intermediate_dir = output_dir.join(format!("{quarter}_intermediate"));
    std::fs::create_dir_all(&intermediate_dir)
        .with_context(|| format!("create {}", intermediate_dir.display()))?;

    let config = PipelineConfig {
        quarter_folder: &args.quarter_folder,
        year: args.year,
        quarter,
        intermediate_dir: &intermediate_dir,
        rules: &rules,
    };
    let outcome = run_quarter_pipelines(&config)?;
    let mut errors = outcome.errors;

    let final_workbook = if args.no_final_export {
        info!("final export skipped by flag");
        None
    } else {
        let path = output_dir.join(format!("{}_{}_自存.xlsx", args.year, quarter));
        match export_aligned_workbook(&path, &schema, &outcome.results) {
            Ok(written) if written.is_empty() => None,
            Ok(_) => Some(path),
            Err(error) => {
                errors.push(format!("final export: {error}"));
                None
            }
        }
    };

    let has_errors = !errors.is_empty();
    Ok(QuarterRunResult {
        year: args.year,
        quarter,
        output_dir,
        final_workbook,
        sources: outcome.summaries,
        errors,
        has_errors,
    })
}

/// List the four sources and their sheet names.
pub fn run_sources() -> Result<()> {
    println!("{:<6} {:<12} {}", "CODE", "INPUT SHEET", "OUTPUT SHEET");
    for source in Source::ALL {
        println!(
            "{:<6} {:<12} {}",
            source.code(),
            source.input_sheet(),
            source.output_sheet()
        );
    }
    Ok(())
}
