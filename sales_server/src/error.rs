use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sales_forecast::ForecastError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;

/// Failures surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error al generar predicción")]
    Prediction(#[from] ForecastError),

    #[error("Error interno del servidor")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    msg: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Prediction(source) => error!(%source, "prediction failed"),
            AppError::Internal(detail) => error!(%detail, "internal error"),
        }

        let body = ErrorBody {
            ok: false,
            msg: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Failures while starting or running the server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Forecast setup error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
