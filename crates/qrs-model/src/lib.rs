//! Data model for the quarterly regulatory statistics pipeline.
//!
//! Tables are explicit ordered-column row sets with capability queries
//! (`has_column`) instead of exception-driven column access; everything the
//! pipeline addresses by name lives in [`columns`].

pub mod bundle;
pub mod columns;
pub mod source;
pub mod table;
pub mod value;

pub use bundle::StatsBundle;
pub use source::{Quarter, Source};
pub use table::Table;
pub use value::Value;
