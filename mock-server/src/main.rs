use std::time::Duration;

use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token_delay_ms = std::env::var("TOKEN_DELAY_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2000);
    let config = MockConfig {
        api_key: std::env::var("PLACES_API_KEY").unwrap_or_else(|_| mock_server::TEST_KEY.to_string()),
        token_delay: Duration::from_millis(token_delay_ms),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, token_delay = ?config.token_delay, "mock places api listening");
    mock_server::run_with(listener, config).await
}
