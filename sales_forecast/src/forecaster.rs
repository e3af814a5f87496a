//! One-step-ahead sales forecast from a linear trend.
//!
//! The trend is fitted against sequence position (1, 2, 3, ...), not against
//! the month number. When the history skips months the observations are
//! still treated as evenly spaced and the "next month" label may not match
//! the period the trend extrapolates to; such histories are logged.

use crate::data::SalesHistory;
use crate::error::Result;
use sales_math::{percent_change, round_to, LinearRegression};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Month abbreviations, indexed by `month % 12` of the last observation
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Label used when no forecast could be produced
pub const NEXT_PERIOD_PLACEHOLDER: &str = "Próximo";

pub const INSIGHT_INSUFFICIENT_DATA: &str = "No hay suficientes datos para generar predicción.";
pub const INSIGHT_GENERATED: &str = "Proyección generada";

/// Minimum number of observations needed to fit a trend
pub const MIN_OBSERVATIONS: usize = 2;

/// Decimal places of the published prediction
pub const PREDICTION_DECIMALS: u32 = 2;
/// Decimal places of the published percentage change
pub const PERCENT_DECIMALS: u32 = 1;

/// Forecast for the period after the last observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Predicted total, rounded to 2 decimals
    pub prediction: f64,
    /// Change versus the last observed total in percent, rounded to 1 decimal
    pub percent_change: f64,
    /// Name of the predicted period
    pub next_period_label: String,
    /// Status message
    pub insight: String,
}

impl ForecastResult {
    /// Zeroed result returned when the history is too short
    pub fn insufficient_data() -> Self {
        Self {
            prediction: 0.0,
            percent_change: 0.0,
            next_period_label: NEXT_PERIOD_PLACEHOLDER.to_string(),
            insight: INSIGHT_INSUFFICIENT_DATA.to_string(),
        }
    }

    /// Whether a trend was actually extrapolated
    pub fn is_projection(&self) -> bool {
        self.insight == INSIGHT_GENERATED
    }
}

impl fmt::Display for ForecastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} ({:+.1}%) - {}",
            self.next_period_label, self.prediction, self.percent_change, self.insight
        )
    }
}

/// Label of the month following `month` (12 wraps to January)
pub fn next_period_label(month: u32) -> &'static str {
    MONTH_LABELS[(month % 12) as usize]
}

/// Stateless linear-trend forecaster
#[derive(Debug, Clone, Copy, Default)]
pub struct Forecaster;

impl Forecaster {
    pub fn new() -> Self {
        Self
    }

    /// Forecast the period after the last entry of `history`.
    ///
    /// Fewer than two entries yield [`ForecastResult::insufficient_data`]
    /// rather than an error.
    pub fn forecast(&self, history: &SalesHistory) -> Result<ForecastResult> {
        let last = match history.last() {
            Some(last) if history.len() >= MIN_OBSERVATIONS => *last,
            _ => {
                debug!(
                    observations = history.len(),
                    "not enough history to project sales"
                );
                return Ok(ForecastResult::insufficient_data());
            }
        };

        let gaps = history.calendar_gaps();
        if !gaps.is_empty() {
            warn!(
                ?gaps,
                "sales history skips months; trend treats observations as consecutive"
            );
        }

        let regression = LinearRegression::fit(&history.totals())?;
        let prediction = regression.forecast_next();
        let change = percent_change(last.total, prediction);

        debug!(
            slope = regression.slope(),
            intercept = regression.intercept(),
            prediction,
            "fitted sales trend"
        );

        Ok(ForecastResult {
            prediction: round_to(prediction, PREDICTION_DECIMALS),
            percent_change: round_to(change, PERCENT_DECIMALS),
            next_period_label: next_period_label(last.month).to_string(),
            insight: INSIGHT_GENERATED.to_string(),
        })
    }
}
