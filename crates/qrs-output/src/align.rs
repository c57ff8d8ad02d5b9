//! Reshaping a classified table to a template column schema.

use tracing::debug;

use qrs_model::columns::{COARSE_CLASS, TYPE_COLUMN};
use qrs_model::{Table, Value};

/// How one template column is filled from the source table.
enum ColumnFill {
    /// Copy the same-named source column.
    Copy(usize),
    /// Substitute the coarse-classification column (the `类型` rule).
    Coarse(usize),
    /// No source data; every row gets `Missing`.
    Null,
}

/// Reshape `table` to exactly the template `columns`, in order.
///
/// A template column present in the source is copied; the special column
/// `类型` is substituted from `类别(粗分)` when the source has it; any other
/// absent column is filled with `Missing`. Row count and order are
/// preserved.
pub fn align_to_template(table: &Table, columns: &[String]) -> Table {
    let fills: Vec<ColumnFill> = columns
        .iter()
        .map(|column| {
            if let Some(index) = table.column_index(column) {
                ColumnFill::Copy(index)
            } else if column == TYPE_COLUMN {
                match table.column_index(COARSE_CLASS) {
                    Some(index) => {
                        debug!("template column '类型' filled from '类别(粗分)'");
                        ColumnFill::Coarse(index)
                    }
                    None => ColumnFill::Null,
                }
            } else {
                ColumnFill::Null
            }
        })
        .collect();

    let mut aligned = Table::new(columns.iter().cloned());
    for row in &table.rows {
        let cells = fills
            .iter()
            .map(|fill| match fill {
                ColumnFill::Copy(index) | ColumnFill::Coarse(index) => {
                    row.get(*index).cloned().unwrap_or(Value::Missing)
                }
                ColumnFill::Null => Value::Missing,
            })
            .collect();
        aligned.push_row(cells);
    }
    aligned
}
