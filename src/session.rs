// =============================================================================
// Session Controller — the single shared buffer behind the dashboard
// =============================================================================
//
// Owns "the currently displayed enriched series for the currently selected
// symbol". The buffer starts empty, is fully replaced (never appended to) on
// every successful selection, and is read by every renderer-facing endpoint.
// A failed selection leaves the previous contents in place.
//
// Selections are serialized: at most one fetch + compute is in flight, and a
// selection that was queued behind a newer one is skipped ("superseded"), so
// a slow stale fetch can never overwrite a fresher buffer.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::engine;
use crate::errors::{FetchError, SelectError};
use crate::types::{EnrichedBar, RawBar, SessionPhase};

// =============================================================================
// Fetch collaborator seam
// =============================================================================

/// Produces the raw daily series for one symbol.
///
/// The controller needs exactly one operation from the outside world; the
/// HTTP client implements it, tests substitute an in-memory fake.
pub trait ChartSource: Send + Sync {
    fn fetch_chart(
        &self,
        symbol: &str,
        range: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RawBar>, FetchError>> + Send;
}

// =============================================================================
// Controller
// =============================================================================

/// Outcome of a `select_symbol` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The buffer now holds the enriched series for the requested symbol.
    Applied,
    /// A newer selection arrived while this one was queued; nothing was done.
    Superseded,
}

/// The session buffer contents: which symbol is displayed and its series.
#[derive(Debug, Clone, Default)]
pub struct SessionBuffer {
    pub symbol: String,
    pub bars: Vec<EnrichedBar>,
}

/// Single-writer owner of the session buffer.
pub struct SessionController<S> {
    source: S,
    chart_range: String,

    buffer: RwLock<SessionBuffer>,
    phase: RwLock<SessionPhase>,

    /// Bumped on every select request; a queued request whose ticket no
    /// longer matches the counter has been superseded.
    requests: AtomicU64,

    /// Bumped on every successful buffer replacement — the renderer refresh
    /// signal (WebSocket push loop, health endpoint).
    version: AtomicU64,

    /// Serializes fetch + compute so at most one is in flight.
    select_lock: Mutex<()>,
}

impl<S: ChartSource> SessionController<S> {
    pub fn new(source: S, chart_range: impl Into<String>) -> Self {
        Self {
            source,
            chart_range: chart_range.into(),
            buffer: RwLock::new(SessionBuffer::default()),
            phase: RwLock::new(SessionPhase::Idle),
            requests: AtomicU64::new(0),
            version: AtomicU64::new(0),
            select_lock: Mutex::new(()),
        }
    }

    /// Replace the session buffer with the enriched series for `symbol`.
    ///
    /// Post-state on `Ok(Applied)`: the buffer holds the new series and the
    /// version has advanced. Post-state on `Err`: buffer and version are
    /// exactly as before the call. The phase is `Idle` again either way.
    pub async fn select_symbol(&self, symbol: &str) -> Result<SelectOutcome, SelectError> {
        let ticket = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        let _flight = self.select_lock.lock().await;

        // A newer selection was requested while this one waited its turn.
        if self.requests.load(Ordering::SeqCst) != ticket {
            info!(symbol, "selection superseded before it started");
            return Ok(SelectOutcome::Superseded);
        }

        *self.phase.write() = SessionPhase::Loading;
        let result = self.fetch_and_enrich(symbol).await;
        *self.phase.write() = SessionPhase::Idle;

        let bars = result?;

        *self.buffer.write() = SessionBuffer {
            symbol: symbol.to_string(),
            bars,
        };

        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        info!(symbol, version, "session buffer replaced");
        Ok(SelectOutcome::Applied)
    }

    async fn fetch_and_enrich(&self, symbol: &str) -> Result<Vec<EnrichedBar>, SelectError> {
        let raw = self
            .source
            .fetch_chart(symbol, &self.chart_range)
            .await
            .map_err(|e| {
                warn!(symbol, error = %e, "chart fetch failed — keeping previous buffer");
                SelectError::Fetch(e)
            })?;

        Ok(engine::enrich(&raw)?)
    }

    /// Read access for renderers: a clone of the current buffer contents.
    pub fn buffer(&self) -> SessionBuffer {
        self.buffer.read().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        *self.phase.read()
    }

    /// Current buffer version; advances only on successful replacement.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
