//! Workbook output: the multi-block sheet writer, template-schema loading,
//! column alignment, and the intermediate/final exports.

pub mod align;
pub mod blocks;
pub mod error;
pub mod export;
pub mod sheet;
pub mod template;

pub use align::align_to_template;
pub use blocks::append_stat_blocks;
pub use error::{OutputError, Result};
pub use export::{
    SourceResult, export_aligned_workbook, write_classified_table, write_intermediate_workbook,
};
pub use sheet::write_table_at;
pub use template::TemplateSchema;
