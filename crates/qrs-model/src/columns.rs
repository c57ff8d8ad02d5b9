//! Column names and sentinel values shared across the pipeline.
//!
//! Source spreadsheets carry Chinese headers; every column the pipeline
//! touches by name is listed here so a typo cannot silently diverge the
//! dedup keys, the classification join, or the statistics gating.

/// Sequence-number column inserted by the normalizers.
pub const SEQ: &str = "序号";

/// Generic drug name.
pub const GENERIC_NAME: &str = "通用名";
/// Dosage form.
pub const DOSAGE_FORM: &str = "剂型";
/// License holder (filing sources).
pub const LICENSE_HOLDER: &str = "持证商";
/// License holder as keyed in the domestic-approval sheet.
pub const LICENSE_HOLDER_NMPA: &str = "持证商(NMPA)";
/// Legacy acceptance number, dropped from filing tables when present.
pub const ACCEPTANCE_NO: &str = "受理号";
/// Filing acceptance date used for keep-latest deduplication.
pub const FILING_DATE: &str = "CDE承办日期";
/// Latest approval date used for the quarter filter.
pub const APPROVAL_DATE: &str = "最新批准日期";
/// Active ingredient (foreign-approval sheet).
pub const ACTIVE_INGREDIENT: &str = "活性成分(中文)";
/// Applicant organization (foreign-approval sheet).
pub const APPLICANT_ORG: &str = "申请机构";

/// First-level drug category, the left half of the classification key.
pub const CATEGORY_ONE: &str = "药品类别一";
/// Second-level drug category, the right half of the classification key.
pub const CATEGORY_TWO: &str = "药品类别二";
/// Coarse classification appended by the classifier.
pub const COARSE_CLASS: &str = "类别(粗分)";
/// Fine classification appended by the classifier.
pub const FINE_CLASS: &str = "详细列（细分）";
/// Reference disease area scanned by the disease-area statistic.
pub const DISEASE_AREA: &str = "参考疾病领域";
/// Target gene column.
pub const TARGET: &str = "靶点";
/// Template column substituted from the coarse classification.
pub const TYPE_COLUMN: &str = "类型";

/// Count column of every statistics table.
pub const COUNT: &str = "数量";
/// English disease-area label column.
pub const DISEASE_EN: &str = "疾病领域(英文)";
/// Chinese disease-area keyword column.
pub const DISEASE_ZH: &str = "疾病领域(中文)";

/// Fallback classification for unmatched or blank (category1, category2) pairs.
pub const OTHERS: &str = "Others";
/// Fallback target label for rows with other data but no target value.
pub const OTHERS_TARGET: &str = "others";
/// Terminal row label of every statistics table.
pub const TOTAL: &str = "Total";

/// String forms treated as blank wherever the join-miss policy applies.
pub const BLANK_SENTINELS: [&str; 4] = ["", "nan", "NaN", "None"];
