//! Siegel webhook verification service.
//!
//! Main entry point: loads configuration, initializes structured logging,
//! and runs the HTTP server until a shutdown signal arrives.

use std::time::Duration;

use anyhow::{Context, Result};
use siegel_api::{start_server, AppState, Config};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config.rust_log);

    info!("Starting Siegel webhook verification service");
    info!(
        host = %config.host,
        port = config.port,
        signature_header = %config.signature_header,
        secret_configured = config.secret_configured(),
        "Configuration loaded"
    );

    if !config.secret_configured() {
        warn!("Webhook secret is empty; every delivery will fail verification");
    }

    let addr = config.parse_server_addr()?;
    let state = AppState::from_config(&config);

    start_server(state, addr, Duration::from_secs(config.request_timeout))
        .await
        .context("Server terminated abnormally")?;

    info!("Siegel shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
