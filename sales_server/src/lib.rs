//! HTTP surface for the Fiambrería Perú sales forecast.
//!
//! # Routes
//! - `GET /` banner
//! - `GET /health` liveness
//! - `GET /api/prediccion/prediccion` monthly history and next-month projection
//!
//! # Configuration
//! Read from the environment, see [`config::ServerConfig`]:
//! `HOST`, `PORT`, `SALES_LEDGER`, `CORS_ORIGIN`, `HISTORY_MONTHS`.
//!
//! Log output is controlled with `RUST_LOG`.
//! ```sh
//! RUST_LOG=sales_server=debug,sales_forecast=debug cargo run -p sales_server
//! ```

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::{ConfigError, ServerConfig};
use error::ServerError;
use routes::{health_handler, prediction_handler, root_handler};
use state::AppState;

pub fn cors_layer(origin: &str) -> Result<CorsLayer, ConfigError> {
    let origin = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidValue {
        key: "CORS_ORIGIN",
        value: origin.to_string(),
        reason: e.to_string(),
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60)))
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/prediccion/prediccion", get(prediction_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Initializing state...");
    let state = AppState::from_config(&config)?;
    let app = build_router(state, cors_layer(&config.cors_origin)?);

    let address = config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
