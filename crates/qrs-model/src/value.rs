use chrono::NaiveDate;

use crate::columns::BLANK_SENTINELS;

/// A single cell of a source or derived table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

impl Value {
    /// Build a text value; whitespace is trimmed and empty text becomes
    /// `Missing`.
    pub fn text(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim().trim_matches('\u{feff}');
        if trimmed.is_empty() {
            Value::Missing
        } else {
            Value::Text(trimmed.to_string())
        }
    }

    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    pub fn date(value: NaiveDate) -> Self {
        Value::Date(value)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// String form used for dedup keys, join keys, and cell output.
    /// `Missing` renders as the empty string.
    pub fn display(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Number(number) => format_number(*number),
            Value::Date(date) => date.format("%Y-%m-%d").to_string(),
            Value::Missing => String::new(),
        }
    }

    /// Blank per the join-miss normalization policy: `Missing`, or a string
    /// form in the sentinel set.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Text(text) => {
                let trimmed = text.trim();
                BLANK_SENTINELS.contains(&trimmed)
            }
            _ => false,
        }
    }
}

/// Integral floats print without a trailing `.0` so numeric identifiers
/// round-trip as they appear in the spreadsheet.
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}
