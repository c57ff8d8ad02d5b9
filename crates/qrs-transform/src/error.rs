use thiserror::Error;

/// Errors raised by the normalizers and the classifier.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is absent from the source table.
    #[error("required column(s) {missing:?} not found; table columns: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// Writing the intermediate classified file failed.
    #[error(transparent)]
    Output(#[from] qrs_output::OutputError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
