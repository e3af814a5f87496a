use std::sync::Arc;

use sales_forecast::{CsvSalesSource, ForecastError, MonthlySalesSource, PredictionService};
use tracing::{info, warn};

use super::config::ServerConfig;

pub type DynSource = Box<dyn MonthlySalesSource>;

#[derive(Clone)]
pub struct AppState {
    pub predictions: Arc<PredictionService<DynSource>>,
}

impl AppState {
    pub fn new(predictions: PredictionService<DynSource>) -> Self {
        Self {
            predictions: Arc::new(predictions),
        }
    }

    /// Prediction service over the CSV ledger named in the config
    pub fn from_config(config: &ServerConfig) -> Result<Self, ForecastError> {
        if !config.sales_ledger.exists() {
            warn!(
                path = %config.sales_ledger.display(),
                "sales ledger not found; predictions will fail until it exists"
            );
        }

        let source: DynSource = Box::new(CsvSalesSource::new(&config.sales_ledger));
        let predictions =
            PredictionService::new(source).with_history_months(config.history_months)?;

        info!(
            ledger = %config.sales_ledger.display(),
            months = predictions.history_months(),
            "prediction service ready"
        );

        Ok(Self::new(predictions))
    }
}
