//! Error taxonomy for the preparation pipeline.

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Errors raised while loading, cleaning or shaping the sales table.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("input file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid {encoding}: {detail}", .path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
        detail: String,
    },

    #[error("expected column '{column}' is missing")]
    Schema { column: String },

    #[error("cannot parse date '{value}' at row {row}")]
    Parse { row: usize, value: String },

    #[error("column '{column}' cannot be cast to integer: {detail}")]
    Conversion { column: String, detail: String },

    #[error("table operation failed: {0}")]
    Frame(#[from] PolarsError),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl PrepError {
    /// Classify a failed read of `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PrepError::NotFound { path }
        } else {
            PrepError::Io { path, source }
        }
    }
}

pub type PrepResult<T> = Result<T, PrepError>;
