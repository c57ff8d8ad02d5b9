//! Error types for workbook ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading source workbooks.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Quarter folder not found or not a directory.
    #[error("quarter folder not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open a workbook file.
    #[error("failed to open workbook {path}: {message}")]
    WorkbookOpen { path: PathBuf, message: String },

    /// The required sheet is missing from the workbook.
    #[error("sheet '{sheet}' not found in {path} (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        path: PathBuf,
        available: Vec<String>,
    },

    /// Failed to read cell data from a sheet.
    #[error("failed to read sheet '{sheet}' from {path}: {message}")]
    SheetRead {
        sheet: String,
        path: PathBuf,
        message: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_path() {
        let err = IngestError::DirectoryNotFound {
            path: PathBuf::from("/data/Q4"),
        };
        assert_eq!(err.to_string(), "quarter folder not found: /data/Q4");
    }
}
