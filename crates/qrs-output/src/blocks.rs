//! The multi-block sheet writer.

use rust_xlsxwriter::Worksheet;
use tracing::debug;

use qrs_model::Table;

use crate::error::Result;
use crate::sheet::write_table_at;

/// Append (title, table) blocks sequentially from `start_row`.
///
/// Absent and empty tables are skipped without consuming rows. A written
/// block occupies one title row, one blank row, then header + data rows;
/// the next block's title lands at `title_row + data_rows + 5`, a fixed
/// offset.
///
/// Returns the start row the next block would use.
pub fn append_stat_blocks(
    worksheet: &mut Worksheet,
    blocks: &[(&str, Option<&Table>)],
    start_row: u32,
) -> Result<u32> {
    let mut row = start_row;
    for (title, table) in blocks {
        let Some(table) = table else {
            debug!(title = %title, "block skipped (not computed)");
            continue;
        };
        if table.is_empty() {
            debug!(title = %title, "block skipped (empty)");
            continue;
        }
        worksheet.write_string(row, 0, *title)?;
        write_table_at(worksheet, table, row + 2)?;
        row += table.height() as u32 + 5;
    }
    Ok(row)
}
