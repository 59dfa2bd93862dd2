// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The upstream dashboard is a public
// page, so there is no authentication layer. CORS is permissive so the chart
// frontend can be served from anywhere during development.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::errors::SelectError;
use crate::session::SelectOutcome;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/chart", get(chart))
        .route("/api/v1/symbols", get(symbols))
        .route("/api/v1/select", post(select))
        .route("/api/v1/state", get(full_state))
        // ── WebSocket (handled in the ws module but mounted here) ────
        .route("/api/v1/ws", get(crate::api::ws::ws_handler))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    buffer_version: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        buffer_version: state.session.version(),
        server_time: chrono::Utc::now().timestamp_millis(),
    };
    Json(resp)
}

// =============================================================================
// Chart data (the renderers' primary read)
// =============================================================================

async fn chart(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.chart_snapshot())
}

// =============================================================================
// Symbol directory
// =============================================================================

async fn symbols(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.symbol_directory.read().clone())
}

// =============================================================================
// Symbol selection
// =============================================================================

#[derive(Deserialize)]
struct SelectRequest {
    symbol: String,
}

async fn select(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Response {
    let symbol = req.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        let body = serde_json::json!({ "error": "symbol must not be empty" });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    info!(symbol = %symbol, "selection requested");

    match state.session.select_symbol(&symbol).await {
        Ok(SelectOutcome::Applied) => {
            let body = serde_json::json!({
                "applied": true,
                "symbol": symbol,
                "version": state.session.version(),
            });
            Json(body).into_response()
        }
        Ok(SelectOutcome::Superseded) => {
            let body = serde_json::json!({
                "applied": false,
                "symbol": symbol,
                "superseded": true,
            });
            Json(body).into_response()
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "selection failed — previous buffer kept");
            state.push_error(format!("selection of {symbol} failed: {e}"));

            let status = match e {
                SelectError::Fetch(_) => StatusCode::BAD_GATEWAY,
                SelectError::Engine(_) => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let body = serde_json::json!({
                "applied": false,
                "symbol": symbol,
                "error": e.to_string(),
            });
            (status, Json(body)).into_response()
        }
    }
}

// =============================================================================
// Full state snapshot
// =============================================================================

async fn full_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.build_snapshot())
}
