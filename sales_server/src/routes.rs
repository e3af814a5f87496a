use std::sync::Arc;

use axum::{extract::State, Json};
use sales_forecast::PredictionReport;
use serde_json::{json, Value};
use tokio::task::spawn_blocking;

use crate::{error::AppError, state::AppState};

pub const BANNER: &str = "Servidor backend de FIAMBRERÍA PERÚ S.A.C. funcionando correctamente";

pub async fn root_handler() -> &'static str {
    BANNER
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Monthly history plus the projected next month
pub async fn prediction_handler(
    State(state): State<AppState>,
) -> Result<Json<PredictionReport>, AppError> {
    let predictions = Arc::clone(&state.predictions);

    // Ledger sources read from disk
    let report = spawn_blocking(move || predictions.predict())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(report))
}
