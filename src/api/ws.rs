// =============================================================================
// WebSocket Handler — push-based chart refresh
// =============================================================================
//
// Renderers connect to `/api/v1/ws` and receive:
//   1. The current chart snapshot immediately on connect.
//   2. A fresh snapshot whenever the session buffer version changes
//      (checked every 500 ms).
//
// Ping frames are answered with Pong; the loop ends when the client closes.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use crate::app_state::AppState;

/// Interval between buffer-version checks.
const PUSH_INTERVAL: Duration = Duration::from_millis(500);

// =============================================================================
// WebSocket upgrade handler
// =============================================================================

/// Axum handler for the WebSocket upgrade request.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    info!("WebSocket connection accepted — upgrading");
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

// =============================================================================
// Connection handler
// =============================================================================

/// Manages a single WebSocket connection lifecycle.
///
/// Runs two concerns via `tokio::select!`:
///   1. **Push loop** — every 500 ms, push a fresh chart snapshot if the
///      buffer version changed since the last send.
///   2. **Recv loop** — answer Ping frames, stop on Close or read error.
async fn handle_ws_connection(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let mut sequence: u64 = 0;

    // Initial snapshot so a renderer never starts from an empty chart.
    let mut last_sent_version = state.session.version();
    if let Err(e) = send_snapshot(&mut sender, &state, &mut sequence).await {
        warn!(error = %e, "failed to send initial WebSocket snapshot");
        return;
    }

    let mut ticker = interval(PUSH_INTERVAL);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let version = state.session.version();
                if version != last_sent_version {
                    if let Err(e) = send_snapshot(&mut sender, &state, &mut sequence).await {
                        debug!(error = %e, "WebSocket push failed — closing");
                        break;
                    }
                    last_sent_version = version;
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Ping(payload))) => {
                        if sender.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket closed by client");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Text/Binary/Pong from the renderer carry no meaning here.
                    }
                    Some(Err(e)) => {
                        debug!(error = %e, "WebSocket read error");
                        break;
                    }
                }
            }
        }
    }

    info!("WebSocket connection closed");
}

/// Serialize the current chart snapshot and send it as one Text frame.
async fn send_snapshot<W>(
    sender: &mut W,
    state: &Arc<AppState>,
    sequence: &mut u64,
) -> Result<(), axum::Error>
where
    W: Sink<Message, Error = axum::Error> + Unpin,
{
    let snapshot = state.chart_snapshot();
    *sequence += 1;

    let envelope = serde_json::json!({
        "type": "chart",
        "sequence": *sequence,
        "symbol": snapshot.symbol,
        "version": snapshot.version,
        "table": snapshot.table,
    });

    sender.send(Message::Text(envelope.to_string())).await
}
