//! Per-source normalizers: deduplication, ordering, quarter filtering, and
//! sequence-number assignment.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use qrs_model::columns::{
    ACCEPTANCE_NO, ACTIVE_INGREDIENT, APPLICANT_ORG, APPROVAL_DATE, DOSAGE_FORM, FILING_DATE,
    GENERIC_NAME, LICENSE_HOLDER, LICENSE_HOLDER_NMPA, SEQ,
};
use qrs_model::{Quarter, Table, Value};

use crate::date::parse_cell_date;
use crate::error::{Result, TransformError};

/// Normalize a filing table (IND / NDA sources).
///
/// Dedup key is (generic name, dosage form, license holder). With the
/// acceptance-date column present, rows are sorted ascending by date
/// (unparseable dates first) and the latest occurrence per key is kept;
/// without it, the last row per key in original order is kept. If any key
/// column is missing the table is returned untouched, without a sequence
/// column: an explicit escape hatch, not an error.
pub fn normalize_filing(table: Table) -> Table {
    let input_rows = table.height();
    let key_columns = [GENERIC_NAME, DOSAGE_FORM, LICENSE_HOLDER];
    let missing = table.missing_columns(&key_columns);
    if !missing.is_empty() {
        warn!(
            ?missing,
            columns = ?table.columns,
            "dedup key columns missing, skipping filing normalization"
        );
        return table;
    }

    let mut table = table;
    let order: Vec<usize> = match table.column_index(FILING_DATE) {
        Some(date_index) => {
            coerce_date_column(&mut table, date_index);
            let mut indices: Vec<usize> = (0..table.height()).collect();
            // Stable: equal dates keep their original relative order, and
            // unparseable dates sort first.
            indices.sort_by_key(|&index| table.rows[index][date_index].as_date());
            indices
        }
        None => {
            warn!(
                date_column = FILING_DATE,
                "date column absent, keeping last occurrence in original order"
            );
            (0..table.height()).collect()
        }
    };

    let key_indices = column_indices(&table, &key_columns);
    let keys: Vec<String> = order
        .iter()
        .map(|&index| dedup_key(&table.rows[index], &key_indices))
        .collect();
    let kept: Vec<usize> = keep_last_positions(&keys)
        .into_iter()
        .map(|position| order[position])
        .collect();
    let mut normalized = table.select_rows(&kept);

    if normalized.drop_column(ACCEPTANCE_NO) {
        debug!(column = ACCEPTANCE_NO, "legacy column dropped");
    }
    assign_sequence(&mut normalized);

    info!(
        input_rows,
        output_rows = normalized.height(),
        "filing table normalized"
    );
    normalized
}

/// Normalize the domestic-approval table (NMPA source).
///
/// Requires the approval-date, drug-name, dosage-form, and license-holder
/// columns. Rows are filtered to the closed quarter interval (both ends
/// inclusive), sorted ascending by approval date, and deduplicated keeping
/// the earliest occurrence per (drug name, dosage form, license holder),
/// the opposite tie-break from the filing normalizer.
pub fn normalize_domestic_approvals(
    table: Table,
    year: i32,
    quarter: Quarter,
) -> Result<Table> {
    let input_rows = table.height();
    let required = [
        APPROVAL_DATE,
        GENERIC_NAME,
        DOSAGE_FORM,
        LICENSE_HOLDER_NMPA,
    ];
    let missing = table.missing_columns(&required);
    if !missing.is_empty() {
        return Err(TransformError::MissingColumns {
            missing,
            available: table.columns.clone(),
        });
    }

    let mut table = table;
    let Some(date_index) = table.column_index(APPROVAL_DATE) else {
        return Err(TransformError::MissingColumns {
            missing: vec![APPROVAL_DATE.to_string()],
            available: table.columns.clone(),
        });
    };
    coerce_date_column(&mut table, date_index);

    let (start, end) = quarter.bounds(year);
    let mut in_quarter: Vec<usize> = (0..table.height())
        .filter(|&index| {
            table.rows[index][date_index]
                .as_date()
                .is_some_and(|date| date >= start && date <= end)
        })
        .collect();
    info!(
        %quarter,
        year,
        start = %start,
        end = %end,
        input_rows,
        quarter_rows = in_quarter.len(),
        "quarter filter applied"
    );

    in_quarter.sort_by_key(|&index| table.rows[index][date_index].as_date());

    let key_indices = column_indices(&table, &[GENERIC_NAME, DOSAGE_FORM, LICENSE_HOLDER_NMPA]);
    let keys: Vec<String> = in_quarter
        .iter()
        .map(|&index| dedup_key(&table.rows[index], &key_indices))
        .collect();
    let kept: Vec<usize> = keep_first_positions(&keys)
        .into_iter()
        .map(|position| in_quarter[position])
        .collect();
    let removed = in_quarter.len() - kept.len();
    if removed > 0 {
        debug!(removed, "duplicate approvals removed");
    }

    let mut normalized = table.select_rows(&kept);
    assign_sequence(&mut normalized);

    info!(output_rows = normalized.height(), "approval table normalized");
    Ok(normalized)
}

/// Normalize the foreign-approval table (FDA source).
///
/// Dedup key is (active ingredient, applicant organization, dosage form);
/// any missing key column is an error, unlike the filing normalizer's
/// silent skip. The last occurrence per key in original order is kept, and
/// sequence numbers are always reassigned 1..N.
pub fn normalize_foreign_approvals(table: Table) -> Result<Table> {
    let input_rows = table.height();
    let key_columns = [ACTIVE_INGREDIENT, APPLICANT_ORG, DOSAGE_FORM];
    let missing = table.missing_columns(&key_columns);
    if !missing.is_empty() {
        return Err(TransformError::MissingColumns {
            missing,
            available: table.columns.clone(),
        });
    }

    let key_indices = column_indices(&table, &key_columns);
    let keys: Vec<String> = table
        .rows
        .iter()
        .map(|row| dedup_key(row, &key_indices))
        .collect();
    let kept = keep_last_positions(&keys);
    let mut normalized = table.select_rows(&kept);

    let sequence: Vec<Value> = (1..=normalized.height())
        .map(|number| Value::Number(number as f64))
        .collect();
    match normalized.column_index(SEQ) {
        Some(index) => {
            warn!(column = SEQ, "sequence column present, reassigning 1..N");
            for (row, value) in normalized.rows.iter_mut().zip(sequence) {
                row[index] = value;
            }
        }
        None => normalized.insert_column(0, SEQ, sequence),
    }

    info!(
        input_rows,
        output_rows = normalized.height(),
        "foreign approval table normalized"
    );
    Ok(normalized)
}

/// Replace every cell of the column with its coerced date, or `Missing`.
fn coerce_date_column(table: &mut Table, index: usize) {
    for row in &mut table.rows {
        row[index] = match parse_cell_date(&row[index]) {
            Some(date) => Value::Date(date),
            None => Value::Missing,
        };
    }
}

fn column_indices(table: &Table, names: &[&str]) -> Vec<usize> {
    names
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect()
}

fn dedup_key(row: &[Value], indices: &[usize]) -> String {
    let mut key = String::new();
    for (position, &index) in indices.iter().enumerate() {
        if position > 0 {
            key.push('|');
        }
        key.push_str(&row[index].display());
    }
    key
}

/// Positions whose key does not recur later (keep-last), in order.
fn keep_last_positions(keys: &[String]) -> Vec<usize> {
    let mut last: HashMap<&str, usize> = HashMap::new();
    for (position, key) in keys.iter().enumerate() {
        last.insert(key, position);
    }
    (0..keys.len())
        .filter(|position| last[keys[*position].as_str()] == *position)
        .collect()
}

/// Positions whose key has not occurred before (keep-first), in order.
fn keep_first_positions(keys: &[String]) -> Vec<usize> {
    let mut seen: HashSet<&str> = HashSet::new();
    (0..keys.len())
        .filter(|&position| seen.insert(keys[position].as_str()))
        .collect()
}

/// Insert the 1..N sequence column unless the table already has one.
fn assign_sequence(table: &mut Table) {
    if table.has_column(SEQ) {
        warn!(column = SEQ, "sequence column already present, keeping it");
        return;
    }
    let sequence: Vec<Value> = (1..=table.height())
        .map(|number| Value::Number(number as f64))
        .collect();
    table.insert_column(0, SEQ, sequence);
}
