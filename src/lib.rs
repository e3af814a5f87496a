//! # Fiambrería
//!
//! Umbrella crate for the Fiambrería Perú sales forecasting workspace.
//!
//! - [`math`]: index-based trend regression and percentage helpers
//! - [`forecast`]: history validation, monthly aggregation, the forecaster
//!   and the prediction service
//!
//! The HTTP surface lives in the `sales_server` member.
//!
//! ## Example
//!
//! ```
//! use fiambreria::forecast::{MonthlySales, SalesHistory, Forecaster};
//!
//! let history = SalesHistory::new(vec![
//!     MonthlySales::new(11, 200.0),
//!     MonthlySales::new(12, 300.0),
//! ]).unwrap();
//!
//! let result = Forecaster::new().forecast(&history).unwrap();
//! assert_eq!(result.prediction, 400.0);
//! assert_eq!(result.next_period_label, "Ene");
//! ```

pub use sales_forecast as forecast;
pub use sales_math as math;
