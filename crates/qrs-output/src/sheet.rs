//! Writing a [`Table`] into a worksheet at a row offset.

use rust_xlsxwriter::{Format, Worksheet};

use qrs_model::{Table, Value};

use crate::error::Result;

/// Write `table` (header + rows) starting at `start_row`, column 0.
///
/// Returns the number of sheet rows occupied (1 for the header plus the
/// table height). Missing cells are left unwritten.
pub fn write_table_at(worksheet: &mut Worksheet, table: &Table, start_row: u32) -> Result<u32> {
    let header_format = Format::new().set_bold();
    for (col_idx, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(start_row, col_idx as u16, column, &header_format)?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let sheet_row = start_row + 1 + row_idx as u32;
        for (col_idx, value) in row.iter().enumerate() {
            write_value(worksheet, sheet_row, col_idx as u16, value)?;
        }
    }
    Ok(1 + table.height() as u32)
}

fn write_value(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        Value::Number(number) => {
            worksheet.write_number(row, col, *number)?;
        }
        Value::Date(date) => {
            worksheet.write_string(row, col, &date.format("%Y-%m-%d").to_string())?;
        }
        Value::Missing => {}
    }
    Ok(())
}
