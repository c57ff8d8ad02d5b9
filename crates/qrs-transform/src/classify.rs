//! The classification join: (category1, category2) → (coarse, fine).

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use qrs_model::columns::{CATEGORY_ONE, CATEGORY_TWO, COARSE_CLASS, FINE_CLASS, OTHERS};
use qrs_model::{Table, Value};
use qrs_output::write_classified_table;
use qrs_rules::RuleStore;

use crate::error::Result;

/// Left-join the table against the rule store and append the coarse and
/// fine classification columns.
///
/// After the join, each of the two columns independently maps any blank
/// value (missing, empty, `nan`, `NaN`, `None`) to `Others`, the join-miss
/// normalization policy. Rows whose pair had no rule are reported once per
/// distinct pair.
pub fn classify(table: Table, rules: &RuleStore) -> Table {
    let category1 = table.column_index(CATEGORY_ONE);
    let category2 = table.column_index(CATEGORY_TWO);

    let mut coarse_values = Vec::with_capacity(table.height());
    let mut fine_values = Vec::with_capacity(table.height());
    let mut unmatched: BTreeSet<(String, String)> = BTreeSet::new();
    let mut unmatched_rows = 0usize;

    for row in &table.rows {
        let key1 = category1.map(|index| row[index].display()).unwrap_or_default();
        let key2 = category2.map(|index| row[index].display()).unwrap_or_default();
        let (coarse, fine) = match rules.classify(&key1, &key2) {
            Some((coarse, fine)) => (Value::text(coarse), Value::text(fine)),
            None => {
                unmatched.insert((key1, key2));
                unmatched_rows += 1;
                (Value::Missing, Value::Missing)
            }
        };
        coarse_values.push(normalize_class(coarse));
        fine_values.push(normalize_class(fine));
    }

    if unmatched_rows > 0 {
        warn!(
            unmatched_rows,
            distinct_pairs = unmatched.len(),
            pairs = ?unmatched,
            "rows without a classification rule, falling back to Others"
        );
    } else {
        info!(rows = table.height(), "all rows matched a classification rule");
    }

    let mut classified = table;
    classified.append_column(COARSE_CLASS, coarse_values);
    classified.append_column(FINE_CLASS, fine_values);
    classified
}

/// Classify and persist the result to the intermediate file before
/// returning it. The write is synchronous; the file exists when this
/// function returns.
pub fn classify_and_save(
    table: Table,
    rules: &RuleStore,
    output_path: &Path,
    data_sheet: &str,
) -> Result<Table> {
    let classified = classify(table, rules);
    write_classified_table(output_path, &classified, data_sheet)?;
    Ok(classified)
}

fn normalize_class(value: Value) -> Value {
    if value.is_blank() {
        Value::text(OTHERS)
    } else {
        value
    }
}
