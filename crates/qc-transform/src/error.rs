//! Error types for the transform stage.

use qc_model::ModelError;
use thiserror::Error;

/// Errors raised by frame-level transforms.
///
/// Per-row parse failures are never errors; they surface as absent values.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Invalid pipeline options.
    #[error("invalid options: {0}")]
    Options(#[from] ModelError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
