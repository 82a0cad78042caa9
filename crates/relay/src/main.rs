//! Doodle Guess relay server

use std::sync::Arc;

use anyhow::Context;
use doodle_config::RelayConfig;
use doodle_relay::{GuessRelay, router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::from_env();
    info!(
        provider = ?config.provider,
        has_credential = config.has_credential(),
        timeout = ?config.upstream_timeout,
        "Starting doodle relay"
    );
    if !config.has_credential() {
        warn!("No upstream credential configured; guesses will fail until one is set");
    }

    let relay = GuessRelay::from_config(&config).context("failed to build HTTP client")?;
    info!(
        adapter = relay.adapter().name(),
        endpoint = relay.adapter().endpoint(),
        "Vision adapter ready"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(relay)))
        .await
        .context("relay server failed")?;
    Ok(())
}
