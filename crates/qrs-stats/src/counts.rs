//! Count-table computations.

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::{debug, info};

use qrs_model::columns::{
    CATEGORY_ONE, CATEGORY_TWO, COARSE_CLASS, COUNT, DISEASE_AREA, DISEASE_EN, DISEASE_ZH,
    FINE_CLASS, OTHERS_TARGET, TARGET, TOTAL,
};
use qrs_model::{StatsBundle, Table, Value};
use qrs_rules::RuleStore;

/// Per-source statistics toggles.
#[derive(Debug, Clone, Copy)]
pub struct StatsOptions {
    /// Whether to compute the disease-area breakdown; the foreign-approval
    /// pipeline does not request it.
    pub disease_area: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self { disease_area: true }
    }
}

/// The target-gene breakdown: a full detail table, a top-10 summary, and
/// the count of rows excluded for having no usable data at all.
#[derive(Debug, Clone)]
pub struct TargetStats {
    pub detail: Table,
    pub summary: Table,
    pub excluded_rows: usize,
}

const TARGET_TOP_K: usize = 10;

/// Value counts of one column, as a (label, count) table ending in a Total
/// row. `None` when the column is absent. Missing cells are not counted.
pub fn category_counts(table: &Table, column: &str) -> Option<Table> {
    let Some(index) = table.column_index(column) else {
        debug!(column, "column absent, statistic skipped");
        return None;
    };
    let counts = value_counts(
        table
            .rows
            .iter()
            .filter(|row| !row[index].is_missing())
            .map(|row| row[index].display()),
    );
    Some(counts_to_table(column, &counts, true))
}

/// Disease-area counts: one row per mapped (English, Chinese) pair counting
/// rows whose disease-area cell contains the Chinese keyword.
///
/// The match is non-exclusive: a row naming several areas counts toward
/// each, so the Total row may exceed the table height. `None` when the
/// disease-area column is absent.
pub fn disease_area_counts(table: &Table, areas: &[(String, String)]) -> Option<Table> {
    let Some(index) = table.column_index(DISEASE_AREA) else {
        debug!(column = DISEASE_AREA, "column absent, statistic skipped");
        return None;
    };

    let mut stats = Table::new([DISEASE_EN, DISEASE_ZH, COUNT]);
    let mut total = 0usize;
    for (english, keyword) in areas {
        let count = table
            .rows
            .iter()
            .filter(|row| row[index].display().contains(keyword))
            .count();
        total += count;
        stats.push_row(vec![
            Value::text(english),
            Value::text(keyword),
            Value::Number(count as f64),
        ]);
    }
    stats.push_row(vec![
        Value::text(TOTAL),
        Value::text(TOTAL),
        Value::Number(total as f64),
    ]);
    Some(stats)
}

/// Target-gene counts.
///
/// Rows with a blank target *and* blank category1 *and* blank category2 are
/// excluded entirely (no usable data); a missing category column counts as
/// blank for every row. Of the remaining rows, a blank target is rewritten
/// to `others` before counting. The detail table lists every distinct
/// target untruncated; the summary keeps the top ten, aggregates the rest
/// into one `others` overflow row (only when more than ten distinct targets
/// exist), and ends with a Total row. `None` when the target column is
/// absent.
pub fn target_counts(table: &Table) -> Option<TargetStats> {
    let Some(target_index) = table.column_index(TARGET) else {
        debug!(column = TARGET, "column absent, statistic skipped");
        return None;
    };
    let category1 = table.column_index(CATEGORY_ONE);
    let category2 = table.column_index(CATEGORY_TWO);

    let is_blank_at = |row: &[Value], index: Option<usize>| match index {
        Some(index) => row[index].is_blank(),
        None => true,
    };

    let mut labels = Vec::new();
    let mut excluded_rows = 0usize;
    for row in &table.rows {
        let target_blank = row[target_index].is_blank();
        if target_blank && is_blank_at(row, category1) && is_blank_at(row, category2) {
            excluded_rows += 1;
            continue;
        }
        if target_blank {
            labels.push(OTHERS_TARGET.to_string());
        } else {
            labels.push(row[target_index].display());
        }
    }

    info!(
        total_rows = table.height(),
        excluded_rows,
        counted_rows = labels.len(),
        "target statistic computed"
    );

    let counts = value_counts(labels.into_iter());
    // Detail lists everything without a Total terminator.
    let detail = counts_to_table(TARGET, &counts, false);

    let mut summary = Table::new([TARGET, COUNT]);
    let mut total = 0usize;
    for (label, count) in counts.iter().take(TARGET_TOP_K) {
        total += count;
        summary.push_row(vec![Value::text(label), Value::Number(*count as f64)]);
    }
    if counts.len() > TARGET_TOP_K {
        let overflow: usize = counts[TARGET_TOP_K..].iter().map(|(_, count)| count).sum();
        total += overflow;
        summary.push_row(vec![
            Value::text(OTHERS_TARGET),
            Value::Number(overflow as f64),
        ]);
    }
    if !summary.is_empty() {
        summary.push_row(vec![Value::text(TOTAL), Value::Number(total as f64)]);
    }

    Some(TargetStats {
        detail,
        summary,
        excluded_rows,
    })
}

/// Assemble the full bundle for one source's classified table.
pub fn compute_bundle(table: &Table, rules: &RuleStore, options: StatsOptions) -> StatsBundle {
    let mut bundle = StatsBundle {
        primary: category_counts(table, CATEGORY_ONE),
        coarse: category_counts(table, COARSE_CLASS),
        fine: category_counts(table, FINE_CLASS),
        disease: if options.disease_area {
            disease_area_counts(table, rules.disease_areas())
        } else {
            None
        },
        ..StatsBundle::default()
    };
    if let Some(target) = target_counts(table) {
        bundle.target_excluded_rows = target.excluded_rows;
        bundle.target_summary = Some(target.summary);
        bundle.target_detail = Some(target.detail);
    }
    bundle
}

/// Occurrence counts ordered by count descending, ties by first appearance.
fn value_counts<I>(values: I) -> Vec<(String, usize)>
where
    I: Iterator<Item = String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        match counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(value.clone(), 1);
                order.push(value);
            }
        }
    }
    let mut result: Vec<(String, usize)> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            (value, count)
        })
        .collect();
    // Stable sort keeps first-appearance order among equal counts.
    result.sort_by_key(|(_, count)| Reverse(*count));
    result
}

fn counts_to_table(label_column: &str, counts: &[(String, usize)], with_total: bool) -> Table {
    let mut table = Table::new([label_column, COUNT]);
    let mut total = 0usize;
    for (label, count) in counts {
        total += count;
        table.push_row(vec![Value::text(label), Value::Number(*count as f64)]);
    }
    if with_total && !table.is_empty() {
        table.push_row(vec![Value::text(TOTAL), Value::Number(total as f64)]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_counts_orders_by_count_then_first_appearance() {
        let counts = value_counts(
            ["b", "a", "a", "c", "b", "a"]
                .iter()
                .map(|value| (*value).to_string()),
        );
        assert_eq!(
            counts,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );

        let tied = value_counts(["y", "x"].iter().map(|value| (*value).to_string()));
        assert_eq!(tied, vec![("y".to_string(), 1), ("x".to_string(), 1)]);
    }

    #[test]
    fn counts_table_total_is_the_sum() {
        let table = counts_to_table("类别(粗分)", &[("BIO".to_string(), 2)], true);
        assert_eq!(table.height(), 2);
        assert_eq!(table.value(1, "类别(粗分)"), Some(&Value::text(TOTAL)));
        assert_eq!(table.value(1, COUNT), Some(&Value::Number(2.0)));
    }

    #[test]
    fn empty_counts_have_no_total_row() {
        let table = counts_to_table("类别(粗分)", &[], true);
        assert!(table.is_empty());
    }
}
