//! tv-webhook relay server
//!
//! Main binary for running the alert relay.
//!
//! # Environment Variables
//!
//! - `PORT`: Port to listen on (default: 8080)
//! - `HOST`: Host to bind to (default: 0.0.0.0)
//! - `TV_WEBHOOK_SECRET`: Secret expected in `/tv/{secret}` (intake is disabled when unset)
//! - `FORWARD_WEBHOOK`: URL every accepted alert is forwarded to (optional)
//! - `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`: Telegram notification target (optional)
//! - `TELEGRAM_API_BASE`: Telegram API base URL (default: https://api.telegram.org)
//! - `SINK_TIMEOUT_SECS`: Per-sink delivery timeout (default: 5)
//! - `RUST_LOG`: Log level (default: info)
//!
//! A `.env` file in the working directory is loaded first; variables already set
//! in the environment take precedence.

use alert_relay_api::{ApiServer, AppState};
use alert_relay_core::{sinks::build_http_client, RelayConfig, SinkSet};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    // Load configuration from environment
    let config = RelayConfig::from_env()?;

    if !config.intake_enabled() {
        tracing::warn!("TV_WEBHOOK_SECRET is not set, every alert will be rejected with 403");
    }

    let client = build_http_client(config.sink_timeout)?;
    let sinks = SinkSet::from_config(&config, client);

    tracing::info!(
        sinks = ?sinks.names(),
        sink_timeout = ?config.sink_timeout,
        "Starting tv-webhook relay"
    );

    // Create app state and server
    let state = AppState::new(config, sinks);
    let server = ApiServer::new(state);

    // Start server with graceful shutdown
    server.serve().await
}
