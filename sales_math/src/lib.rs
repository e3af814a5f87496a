//! # Sales Math
//!
//! Numeric building blocks for the sales forecaster: an index-based
//! least-squares trend line and the percentage/rounding helpers used to
//! present its output.

use thiserror::Error;

pub mod change;
pub mod regression;

pub use change::{percent_change, round_to};
pub use regression::LinearRegression;

/// Errors that can occur in sales calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for sales math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = MathError::InsufficientData("need 2 points".to_string());
        assert_eq!(
            err.to_string(),
            "Insufficient data for calculation: need 2 points"
        );

        let err = MathError::InvalidInput("NaN at position 3".to_string());
        assert!(err.to_string().contains("NaN at position 3"));
    }
}
