//! Prediction service: fetch history from an injected source, validate it,
//! forecast it.

use crate::data::{MonthlySales, RawMonthlySales, SalesHistory, SalesLedger};
use crate::error::{ForecastError, Result};
use crate::forecaster::{ForecastResult, Forecaster};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Months of history requested from the source by default
pub const DEFAULT_HISTORY_MONTHS: usize = 6;

/// Supplier of monthly sales aggregates
pub trait MonthlySalesSource: Send + Sync {
    /// Up to `limit` monthly totals, ascending by month
    fn recent_monthly_totals(&self, limit: usize) -> Result<Vec<RawMonthlySales>>;
}

impl<S: MonthlySalesSource + ?Sized> MonthlySalesSource for Box<S> {
    fn recent_monthly_totals(&self, limit: usize) -> Result<Vec<RawMonthlySales>> {
        (**self).recent_monthly_totals(limit)
    }
}

impl<S: MonthlySalesSource + ?Sized> MonthlySalesSource for Arc<S> {
    fn recent_monthly_totals(&self, limit: usize) -> Result<Vec<RawMonthlySales>> {
        (**self).recent_monthly_totals(limit)
    }
}

impl MonthlySalesSource for SalesLedger {
    fn recent_monthly_totals(&self, limit: usize) -> Result<Vec<RawMonthlySales>> {
        Ok(self
            .monthly_totals(limit)
            .into_iter()
            .map(RawMonthlySales::from)
            .collect())
    }
}

/// Ledger file re-read on every request
#[derive(Debug, Clone)]
pub struct CsvSalesSource {
    path: PathBuf,
}

impl CsvSalesSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MonthlySalesSource for CsvSalesSource {
    fn recent_monthly_totals(&self, limit: usize) -> Result<Vec<RawMonthlySales>> {
        let ledger = SalesLedger::from_csv(&self.path).map_err(|e| {
            ForecastError::SourceError(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), sales = ledger.len(), "loaded sales ledger");
        ledger.recent_monthly_totals(limit)
    }
}

/// History used for the forecast together with the forecast itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub historial: Vec<MonthlySales>,
    #[serde(flatten)]
    pub forecast: ForecastResult,
}

/// Runs the forecaster over the history supplied by `S`
#[derive(Debug, Clone)]
pub struct PredictionService<S> {
    source: S,
    forecaster: Forecaster,
    history_months: usize,
}

impl<S: MonthlySalesSource> PredictionService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            forecaster: Forecaster::new(),
            history_months: DEFAULT_HISTORY_MONTHS,
        }
    }

    /// Change how many months of history are requested (1 to 12)
    pub fn with_history_months(mut self, months: usize) -> Result<Self> {
        if !(1..=12).contains(&months) {
            return Err(ForecastError::InvalidParameter(format!(
                "History window must be between 1 and 12 months, got {}",
                months
            )));
        }
        self.history_months = months;
        Ok(self)
    }

    pub fn history_months(&self) -> usize {
        self.history_months
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, validate and forecast
    pub fn predict(&self) -> Result<PredictionReport> {
        let mut rows = self.source.recent_monthly_totals(self.history_months)?;
        if rows.len() > self.history_months {
            debug!(
                returned = rows.len(),
                requested = self.history_months,
                "source returned more months than requested; keeping the latest"
            );
            rows.drain(..rows.len() - self.history_months);
        }

        let history = SalesHistory::from_raw(rows)?;
        let forecast = self.forecaster.forecast(&history)?;

        info!(
            months = history.len(),
            prediction = forecast.prediction,
            percent_change = forecast.percent_change,
            next = %forecast.next_period_label,
            "sales forecast computed"
        );

        Ok(PredictionReport {
            historial: history.into_inner(),
            forecast,
        })
    }
}
