use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the template schema or writing workbooks.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Template schema file does not exist.
    #[error("template schema not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// Failed to read the template schema file.
    #[error("failed to read template schema {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template schema is not valid JSON.
    #[error("failed to parse template schema {path}: {source}")]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Template schema parsed but holds an unusable value.
    #[error("invalid template schema {path}: {message}")]
    TemplateInvalid { path: PathBuf, message: String },

    /// Workbook construction or save failed.
    #[error("workbook write failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
