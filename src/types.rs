// =============================================================================
// Shared types used across the Stockboard dashboard backend
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading-day observation as delivered by the chart endpoint.
///
/// The payload carries more fields (change, unadjusted prices, labels, ...);
/// serde ignores everything not listed here. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A [`RawBar`] plus every derived column, each computed from the bars up to
/// and including this one (no look-ahead).
///
/// Windowed indicators are `None` until their window is full — distinct from
/// a computed zero. The MACD triple and OBV are total over the whole series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,

    pub sma_5: Option<f64>,
    pub sma_10: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_100: Option<f64>,

    pub boll_upper: Option<f64>,
    pub boll_lower: Option<f64>,

    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,

    pub rsi_15: Option<f64>,

    pub obv: i64,
}

/// One entry of the symbol directory payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,

    /// Security type; `"N/A"` marks entries that are not selectable.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Whether the session controller is awaiting the next selection or has a
/// fetch + compute in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Idle,
    Loading,
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
        }
    }
}
