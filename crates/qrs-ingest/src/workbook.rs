//! Reading a named sheet into a typed [`Table`].

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use qrs_model::{Table, Value};

use crate::error::{IngestError, Result};

/// Read the named sheet of a workbook into a [`Table`].
///
/// The first row supplies the column names (trimmed, BOM stripped,
/// inner whitespace collapsed); remaining rows become typed values. Rows
/// that are entirely empty are dropped; short rows are padded with
/// `Missing` and long rows truncated to the header width.
pub fn read_sheet_table(path: &Path, sheet: &str) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|error| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(IngestError::SheetNotFound {
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|error| IngestError::SheetRead {
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::default());
    };

    let headers: Vec<String> = header_row.iter().map(normalize_header).collect();
    let mut table = Table::new(headers);

    for row in rows {
        let values: Vec<Value> = row.iter().map(cell_to_value).collect();
        if values.iter().all(Value::is_missing) {
            continue;
        }
        table.push_row(values);
    }

    debug!(
        path = %path.display(),
        sheet = %sheet,
        columns = table.columns.len(),
        rows = table.height(),
        "sheet read"
    );
    Ok(table)
}

fn normalize_header(cell: &Data) -> String {
    let raw = cell_to_string(cell);
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Missing,
        Data::String(text) => Value::text(text),
        Data::Float(number) => Value::Number(*number),
        Data::Int(number) => Value::Number(*number as f64),
        Data::Bool(flag) => Value::text(flag.to_string()),
        Data::DateTime(datetime) => match datetime.as_datetime() {
            Some(naive) => Value::Date(naive.date()),
            None => Value::Missing,
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => Value::text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrs_model::Value;

    #[test]
    fn header_normalization_collapses_whitespace() {
        let cell = Data::String("  通用名  \u{feff}".to_string());
        assert_eq!(normalize_header(&cell), "通用名");
        let cell = Data::String("a   b".to_string());
        assert_eq!(normalize_header(&cell), "a b");
    }

    #[test]
    fn cell_conversion() {
        assert_eq!(cell_to_value(&Data::Empty), Value::Missing);
        assert_eq!(cell_to_value(&Data::Int(3)), Value::Number(3.0));
        assert_eq!(
            cell_to_value(&Data::String(" BIO ".to_string())),
            Value::text("BIO")
        );
        assert_eq!(
            cell_to_value(&Data::String("   ".to_string())),
            Value::Missing
        );
    }
}
