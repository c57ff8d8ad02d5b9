//! The statistics engine.
//!
//! Five independent breakdowns over a classified table, each gated on the
//! presence of its source column: absent column → the statistic is `None`,
//! never an error.

pub mod counts;

pub use counts::{
    StatsOptions, TargetStats, category_counts, compute_bundle, disease_area_counts,
    target_counts,
};
