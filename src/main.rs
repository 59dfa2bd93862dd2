// =============================================================================
// Stockboard — Main Entry Point
// =============================================================================
//
// Startup order matters: the default symbol is selected *before* the API
// starts serving, so no renderer ever observes an empty session buffer.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod engine;
mod errors;
mod iex;
mod indicators;
mod runtime_config;
mod session;
mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::iex::client::selectable_symbols;
use crate::iex::IexClient;
use crate::runtime_config::RuntimeConfig;

/// Config file sitting next to the binary.
const CONFIG_PATH: &str = "dashboard_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║              Stockboard — Starting Up                   ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = RuntimeConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Env overrides.
    if let Ok(base) = std::env::var("STOCKBOARD_API_BASE") {
        let base = base.trim().trim_end_matches('/');
        if !base.is_empty() {
            config.api_base = base.to_string();
        }
    }
    if let Ok(sym) = std::env::var("STOCKBOARD_SYMBOL") {
        let sym = sym.trim();
        if !sym.is_empty() {
            config.default_symbol = sym.to_uppercase();
        }
    }

    info!(
        api_base = %config.api_base,
        default_symbol = %config.default_symbol,
        chart_range = %config.chart_range,
        "dashboard configured"
    );

    // ── 2. Chart client & shared state ───────────────────────────────────
    let client = IexClient::new(
        config.api_base.clone(),
        Duration::from_secs(config.http_timeout_secs),
    );
    let default_symbol = config.default_symbol.clone();
    let state = Arc::new(AppState::new(config, client.clone()));

    // ── 3. Symbol directory ──────────────────────────────────────────────
    match client.fetch_symbols().await {
        Ok(entries) => {
            let symbols = selectable_symbols(&entries);
            info!(
                total = entries.len(),
                selectable = symbols.len(),
                "symbol directory loaded"
            );
            *state.symbol_directory.write() = symbols;
        }
        Err(e) => {
            warn!(error = %e, "failed to load symbol directory — only the default symbol will be offered");
            state.push_error(format!("symbol directory fetch failed: {e}"));
            *state.symbol_directory.write() = vec![default_symbol.clone()];
        }
    }

    // ── 4. Initial selection ─────────────────────────────────────────────
    state
        .session
        .select_symbol(&default_symbol)
        .await
        .with_context(|| format!("initial selection of {default_symbol} failed"))?;
    info!(symbol = %default_symbol, "initial series loaded");

    // ── 5. API server ────────────────────────────────────────────────────
    let bind_addr =
        std::env::var("STOCKBOARD_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());
    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;
    info!(addr = %bind_addr, "dashboard API listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result.context("API server failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Shutdown signal received — stopping gracefully");
        }
    }

    if let Err(e) = state.runtime_config.read().save(CONFIG_PATH) {
        error!(error = %e, "Failed to save config on shutdown");
    }

    info!("Stockboard shut down complete.");
    Ok(())
}
