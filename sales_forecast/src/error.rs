//! Error types for the sales_forecast crate

use sales_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A history row failed validation at the data boundary
    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// Error from the data source supplying the history
    #[error("Source error: {0}")]
    SourceError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from reading a CSV ledger
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl ForecastError {
    pub(crate) fn invalid(row: usize, reason: impl Into<String>) -> Self {
        ForecastError::InvalidRecord {
            row,
            reason: reason.into(),
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
