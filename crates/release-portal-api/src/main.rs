//! Release portal API server
//!
//! Usage: `release-portal-api [CONFIG_PATH]`

use std::path::PathBuf;

use anyhow::Context;
use release_portal_api::{app, AppState, PortalConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config =
        PortalConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level()?)
        .init();

    let addr = config.server.socket_addr();
    let state = AppState::new(config.notification.clone());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Release portal API listening");

    axum::serve(listener, app(state)).await.context("Server error")?;
    Ok(())
}
