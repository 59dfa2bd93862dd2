// =============================================================================
// Central Application State — Stockboard dashboard backend
// =============================================================================
//
// Single source of truth shared across the API handlers and the WebSocket
// push loop via `Arc<AppState>`.
//
// Thread safety:
//   - parking_lot::RwLock for mutable shared collections.
//   - The session controller manages its own interior mutability and owns
//     the buffer version counter used as the refresh signal.
// =============================================================================

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;

use crate::engine::{self, ChartTable};
use crate::iex::IexClient;
use crate::runtime_config::RuntimeConfig;
use crate::session::SessionController;
use crate::types::SessionPhase;

/// Maximum number of recent errors retained for the dashboard error log.
const MAX_RECENT_ERRORS: usize = 50;

/// A recorded error event for the dashboard error log.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    /// Human-readable error message.
    pub message: String,
    /// ISO 8601 timestamp.
    pub at: String,
}

// =============================================================================
// AppState
// =============================================================================

/// Central application state shared across all async tasks via `Arc<AppState>`.
pub struct AppState {
    // ── Configuration ───────────────────────────────────────────────────
    pub runtime_config: RwLock<RuntimeConfig>,

    // ── Session ─────────────────────────────────────────────────────────
    pub session: SessionController<IexClient>,

    // ── Symbol directory ────────────────────────────────────────────────
    /// Selectable symbols for the dropdown, loaded once at startup.
    pub symbol_directory: RwLock<Vec<String>>,

    // ── Error Log ───────────────────────────────────────────────────────
    pub recent_errors: RwLock<Vec<ErrorRecord>>,

    // ── Timing ──────────────────────────────────────────────────────────
    /// Instant when the process started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Construct a new `AppState` from the given configuration and chart
    /// client. The returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: RuntimeConfig, client: IexClient) -> Self {
        let chart_range = config.chart_range.clone();

        Self {
            runtime_config: RwLock::new(config),
            session: SessionController::new(client, chart_range),
            symbol_directory: RwLock::new(Vec::new()),
            recent_errors: RwLock::new(Vec::new()),
            start_time: std::time::Instant::now(),
        }
    }

    // ── Error Logging ───────────────────────────────────────────────────

    /// Record an error message. The ring is capped at [`MAX_RECENT_ERRORS`];
    /// oldest entries are evicted when the limit is reached.
    pub fn push_error(&self, message: String) {
        let record = ErrorRecord {
            message,
            at: Utc::now().to_rfc3339(),
        };

        let mut errors = self.recent_errors.write();
        errors.push(record);
        while errors.len() > MAX_RECENT_ERRORS {
            errors.remove(0);
        }
    }

    // ── Snapshot Builders ───────────────────────────────────────────────

    /// Chart payload for the renderers. The REST chart endpoint and the
    /// WebSocket push loop share this shape.
    pub fn chart_snapshot(&self) -> ChartSnapshot {
        let buffer = self.session.buffer();
        ChartSnapshot {
            symbol: buffer.symbol,
            version: self.session.version(),
            table: engine::chart_table(&buffer.bars),
        }
    }

    /// Full dashboard state snapshot for `GET /api/v1/state`.
    pub fn build_snapshot(&self) -> StateSnapshot {
        let buffer = self.session.buffer();

        StateSnapshot {
            version: self.session.version(),
            server_time: Utc::now().timestamp_millis(),
            phase: self.session.phase(),
            selected_symbol: buffer.symbol,
            bar_count: buffer.bars.len(),
            symbol_count: self.symbol_directory.read().len(),
            recent_errors: self.recent_errors.read().clone(),
            uptime_secs: self.start_time.elapsed().as_secs(),
        }
    }
}

// =============================================================================
// Serialisable snapshot types
// =============================================================================

/// Chart payload pushed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSnapshot {
    pub symbol: String,
    pub version: u64,
    pub table: ChartTable,
}

/// Full dashboard state snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub version: u64,
    pub server_time: i64,
    pub phase: SessionPhase,
    pub selected_symbol: String,
    pub bar_count: usize,
    pub symbol_count: usize,
    pub recent_errors: Vec<ErrorRecord>,
    pub uptime_secs: u64,
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> AppState {
        let config = RuntimeConfig::default();
        let client = IexClient::new(config.api_base.clone(), Duration::from_secs(1));
        AppState::new(config, client)
    }

    #[test]
    fn error_ring_is_capped() {
        let state = state();
        for i in 0..60 {
            state.push_error(format!("error {i}"));
        }

        let errors = state.recent_errors.read();
        assert_eq!(errors.len(), 50);
        // Oldest entries were evicted.
        assert_eq!(errors[0].message, "error 10");
        assert_eq!(errors[49].message, "error 59");
    }

    #[test]
    fn snapshot_of_fresh_state_is_empty() {
        let state = state();
        let snapshot = state.build_snapshot();

        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.phase, SessionPhase::Idle);
        assert_eq!(snapshot.bar_count, 0);
        assert_eq!(snapshot.symbol_count, 0);
        assert!(snapshot.selected_symbol.is_empty());
    }

    #[test]
    fn chart_snapshot_of_fresh_state_has_empty_columns() {
        let snapshot = state().chart_snapshot();
        assert!(snapshot.table.date.is_empty());
        assert!(snapshot.table.zeros.is_empty());
    }
}
