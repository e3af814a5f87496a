use std::{
    env,
    fmt::{Debug, Display},
    path::PathBuf,
    str::FromStr,
};

use sales_forecast::service::DEFAULT_HISTORY_MONTHS;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub sales_ledger: PathBuf,
    pub cors_origin: String,
    pub history_months: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            sales_ledger: PathBuf::from("data/ventas.csv"),
            cors_origin: "http://localhost:5173".to_string(),
            history_months: DEFAULT_HISTORY_MONTHS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: try_load(&lookup, "HOST", defaults.host)?,
            port: try_load(&lookup, "PORT", defaults.port)?,
            sales_ledger: try_load(&lookup, "SALES_LEDGER", defaults.sales_ledger)?,
            cors_origin: try_load(&lookup, "CORS_ORIGIN", defaults.cors_origin)?,
            history_months: try_load(&lookup, "HISTORY_MONTHS", defaults.history_months)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Debug,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default:?}");
            Ok(default)
        }
    }
}
