//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use qrs_model::Quarter;

#[derive(Parser)]
#[command(
    name = "qrs",
    version,
    about = "Quarterly regulatory statistics workbench",
    long_about = "Process one quarter's regulatory spreadsheets (IND, NDA, FDA, NMPA):\n\
                  normalize and classify each source, compute the statistics bundles,\n\
                  and export the template-aligned summary workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process a quarter folder and export the aligned workbook.
    Quarter(QuarterArgs),

    /// List the four regulatory sources and their sheet names.
    Sources,
}

#[derive(Parser)]
pub struct QuarterArgs {
    /// Folder holding the quarter's source workbooks.
    #[arg(value_name = "QUARTER_FOLDER")]
    pub quarter_folder: PathBuf,

    /// Calendar year of the quarter (e.g. 2025).
    #[arg(long)]
    pub year: i32,

    /// Quarter to process.
    #[arg(long, value_enum)]
    pub quarter: QuarterArg,

    /// Output directory (default: <QUARTER_FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to the classification rules JSON.
    #[arg(
        long = "rules-config",
        value_name = "PATH",
        default_value = "rules_config.json"
    )]
    pub rules_config: PathBuf,

    /// Path to the template column schema JSON.
    #[arg(
        long = "template-config",
        value_name = "PATH",
        default_value = "template_columns.json"
    )]
    pub template_config: PathBuf,

    /// Write the per-source intermediate workbooks only, skipping the final
    /// aligned export.
    #[arg(long = "no-final-export")]
    pub no_final_export: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QuarterArg {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl From<QuarterArg> for Quarter {
    fn from(arg: QuarterArg) -> Self {
        match arg {
            QuarterArg::Q1 => Quarter::Q1,
            QuarterArg::Q2 => Quarter::Q2,
            QuarterArg::Q3 => Quarter::Q3,
            QuarterArg::Q4 => Quarter::Q4,
        }
    }
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
