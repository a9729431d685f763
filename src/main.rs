//! peanut-frame server entry point.
//!
//! Loads configuration, wires the Dune and Airstack clients into the
//! application state and serves the frame over HTTP.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use peanut_frame::api;
use peanut_frame::app_state::AppState;
use peanut_frame::clock::SystemClock;
use peanut_frame::config::FrameConfig;
use peanut_frame::source::{AirstackClient, DuneClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = FrameConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting peanut-frame");

    if config.dune_api_key.is_empty() {
        tracing::warn!("DUNE_API_KEY is not set, dataset fetches will fail");
    }
    if config.airstack_api_key.is_empty() {
        tracing::warn!("AIRSTACK_API_KEY is not set, names will show as placeholders");
    }

    // Build upstream clients
    let mut http = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = config.upstream_timeout() {
        http = http.timeout(timeout);
    }
    let http = http.build().context("building HTTP client")?;

    let source = Arc::new(DuneClient::new(
        http.clone(),
        config.dune_api_url.clone(),
        config.dune_api_key.clone(),
    ));
    let directory = Arc::new(AirstackClient::new(
        http,
        config.airstack_api_url.clone(),
        config.airstack_api_key.clone(),
    ));

    // Build application state and router
    let listen_addr = config.listen_addr;
    let state = AppState::new(config, source, directory, Arc::new(SystemClock));
    let app = api::build_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
