use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the rules configuration.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Rules configuration file does not exist.
    #[error("rules configuration not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the configuration file.
    #[error("failed to read rules configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid JSON or misses required keys.
    #[error("failed to parse rules configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("invalid rules configuration {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, RulesError>;
