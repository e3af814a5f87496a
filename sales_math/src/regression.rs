//! Linear trend fitted against sequence position.
//!
//! Observations are indexed `1..=n` in the order they are given; the actual
//! period identifiers never enter the fit.

use crate::{MathError, Result};

/// Ordinary least-squares line `y = slope * x + intercept` over `x = 1..=n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    n: usize,
    slope: f64,
    intercept: f64,
}

impl LinearRegression {
    /// Fit a trend line to the given values using the closed-form sums.
    ///
    /// Needs at least two values. When the index variance term is zero the
    /// slope falls back to 0 instead of dividing. Values large enough to
    /// overflow the sums are rejected rather than yielding NaN or infinity.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Linear regression needs at least 2 points, got {}",
                values.len()
            )));
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Non-finite value at position {}",
                pos + 1
            )));
        }

        let n = values.len() as f64;

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_x2 = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = (i + 1) as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        let denominator = n * sum_x2 - sum_x * sum_x;
        let slope = if denominator != 0.0 {
            (n * sum_xy - sum_x * sum_y) / denominator
        } else {
            0.0
        };
        let intercept = (sum_y - slope * sum_x) / n;

        let fitted = Self {
            n: values.len(),
            slope,
            intercept,
        };

        if !slope.is_finite() || !intercept.is_finite() || !fitted.forecast_next().is_finite() {
            return Err(MathError::InvalidInput(
                "Values too large for a finite trend line".to_string(),
            ));
        }

        Ok(fitted)
    }

    /// Value of the fitted line at position `x`
    pub fn predict_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// One step past the last observation (`x = n + 1`)
    pub fn forecast_next(&self) -> f64 {
        self.predict_at((self.n + 1) as f64)
    }

    /// Get the fitted slope (trend per period)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the fitted intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of observations used in the fit
    pub fn len(&self) -> usize {
        self.n
    }

    /// True only for a line fitted to no points, which `fit` never returns
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_line() {
        let lr = LinearRegression::fit(&[10.0, 20.0, 30.0, 40.0]).unwrap();

        assert_relative_eq!(lr.slope(), 10.0);
        assert_relative_eq!(lr.intercept(), 0.0);
        assert_relative_eq!(lr.forecast_next(), 50.0);
        assert_eq!(lr.len(), 4);
    }

    #[test]
    fn test_constant_series_has_flat_slope() {
        let lr = LinearRegression::fit(&[50.0, 50.0, 50.0]).unwrap();

        assert_eq!(lr.slope(), 0.0);
        assert_relative_eq!(lr.forecast_next(), 50.0);
    }

    #[test]
    fn test_descending_to_zero() {
        let lr = LinearRegression::fit(&[10.0, 5.0, 0.0]).unwrap();

        assert_relative_eq!(lr.slope(), -5.0);
        assert_relative_eq!(lr.intercept(), 15.0);
        assert_relative_eq!(lr.forecast_next(), -5.0);
    }

    #[test]
    fn test_two_points() {
        let lr = LinearRegression::fit(&[100.0, 130.0]).unwrap();

        assert_relative_eq!(lr.slope(), 30.0);
        assert_relative_eq!(lr.predict_at(1.0), 100.0);
        assert_relative_eq!(lr.forecast_next(), 160.0);
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(matches!(
            LinearRegression::fit(&[]),
            Err(MathError::InsufficientData(_))
        ));
        assert!(matches!(
            LinearRegression::fit(&[42.0]),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let err = LinearRegression::fit(&[1.0, f64::NAN, 3.0]).unwrap_err();
        assert_eq!(
            err,
            MathError::InvalidInput("Non-finite value at position 2".to_string())
        );

        assert!(LinearRegression::fit(&[1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_rejects_overflowing_sums() {
        let err = LinearRegression::fit(&[1e308, 1e308]).unwrap_err();
        assert!(matches!(err, MathError::InvalidInput(_)));

        // Large but safe totals still fit
        let lr = LinearRegression::fit(&[1e15, 2e15]).unwrap();
        assert_relative_eq!(lr.forecast_next(), 3e15);
    }
}
