//! The template column schema: the authoritative output column list per sheet.

use std::path::Path;

use tracing::info;

use crate::error::{OutputError, Result};

/// Ordered column lists per output sheet name, loaded from JSON once per
/// export and immutable for the run.
#[derive(Debug, Clone, Default)]
pub struct TemplateSchema {
    sheets: Vec<(String, Vec<String>)>,
}

impl TemplateSchema {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OutputError::TemplateNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| OutputError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|source| OutputError::TemplateParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut sheets = Vec::with_capacity(parsed.len());
        for (sheet, columns) in parsed {
            let Some(columns) = columns.as_array() else {
                return Err(OutputError::TemplateInvalid {
                    path: path.to_path_buf(),
                    message: format!("sheet '{sheet}' is not an array of column names"),
                });
            };
            let mut names = Vec::with_capacity(columns.len());
            for column in columns {
                let Some(name) = column.as_str() else {
                    return Err(OutputError::TemplateInvalid {
                        path: path.to_path_buf(),
                        message: format!("sheet '{sheet}' holds a non-string column name"),
                    });
                };
                names.push(name.to_string());
            }
            sheets.push((sheet, names));
        }

        info!(
            path = %path.display(),
            sheet_count = sheets.len(),
            "template schema loaded"
        );
        Ok(Self { sheets })
    }

    /// Build a schema directly from its parts.
    pub fn from_parts(sheets: Vec<(String, Vec<String>)>) -> Self {
        Self { sheets }
    }

    /// Column list for a sheet name; `None` when the template omits it.
    pub fn columns(&self, sheet: &str) -> Option<&[String]> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, columns)| columns.as_slice())
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(name, _)| name.as_str())
    }
}
