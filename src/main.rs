// =============================================================================
// MarketPulse Analysis Engine — Main Entry Point
// =============================================================================
//
// Serves the technical-indicator engine over a JSON/HTTP API.  A dashboard
// front-end loads a price window, then queries moving averages, Bollinger
// Bands, RSI, MACD, pivot levels, statistics, and the composite summary.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod config;
mod indicators;
mod signals;
mod stats;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::EngineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("MarketPulse Analysis Engine — starting up");

    let config_path =
        std::env::var("MARKETPULSE_CONFIG").unwrap_or_else(|_| "engine_config.json".into());
    let mut config = EngineConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });

    // Override the bind address from the environment if available.
    if let Ok(addr) = std::env::var("MARKETPULSE_BIND") {
        config.bind_address = addr;
    }

    info!(
        bind_address = %config.bind_address,
        ma_period = config.indicators.ma_period,
        bollinger_period = config.indicators.bollinger_period,
        rsi_period = config.indicators.rsi_period,
        "Engine configured"
    );

    // ── 2. Shared state & API server ─────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&state.config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", state.config.bind_address))?;

    info!(addr = %state.config.bind_address, "API server listening");
    axum::serve(listener, app)
        .await
        .context("API server failed")?;

    Ok(())
}
