use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("unknown outlier method '{0}' (expected IQR or std)")]
    UnknownOutlierMethod(String),
    #[error("outlier factor must be a positive number, got {0}")]
    InvalidFactor(f64),
    #[error("outlier column name must not be empty")]
    EmptyColumnName,
}

pub type Result<T> = std::result::Result<T, ModelError>;
