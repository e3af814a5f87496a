use sales_server::{config::ServerConfig, error::ServerError, start_server};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_server=info,sales_forecast=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    start_server(config).await
}
