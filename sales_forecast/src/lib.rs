//! # Sales Forecast
//!
//! Monthly sales forecasting for the Fiambrería Perú back office.
//!
//! ## Features
//!
//! - Validation boundary turning loosely-typed monthly rows into a typed history
//! - Aggregation of individual sales into calendar-month totals
//! - Linear-trend projection of the next month with a percentage change
//! - A prediction service over an injected data source
//!
//! ## Quick Start
//!
//! ```rust
//! use sales_forecast::data::{MonthlySales, SalesHistory};
//! use sales_forecast::forecaster::Forecaster;
//!
//! let history = SalesHistory::new(vec![
//!     MonthlySales::new(1, 10.0),
//!     MonthlySales::new(2, 20.0),
//!     MonthlySales::new(3, 30.0),
//!     MonthlySales::new(4, 40.0),
//! ])?;
//!
//! let result = Forecaster::new().forecast(&history)?;
//! assert_eq!(result.prediction, 50.0);
//! assert_eq!(result.percent_change, 25.0);
//! assert_eq!(result.next_period_label, "May");
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod data;
pub mod error;
pub mod forecaster;
pub mod service;

// Re-export commonly used types
pub use crate::data::{MonthlySales, RawMonthlySales, SaleRecord, SalesHistory, SalesLedger};
pub use crate::error::ForecastError;
pub use crate::forecaster::{ForecastResult, Forecaster};
pub use crate::service::{CsvSalesSource, MonthlySalesSource, PredictionReport, PredictionService};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
