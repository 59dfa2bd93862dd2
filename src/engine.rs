// =============================================================================
// Indicator Engine — raw series in, enriched series out
// =============================================================================
//
// Pure transformation over one symbol's ordered daily bars. Every derived
// field at index i is a function of bars[0..=i] only; the output keeps the
// input's length and date order. Safe to call repeatedly — no shared state.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::EngineError;
use crate::indicators::{bollinger, macd, obv, rsi, sma};
use crate::types::{EnrichedBar, RawBar};

/// Bollinger window and band width (20-period, ± 2σ).
pub const BOLL_PERIOD: usize = 20;
pub const BOLL_NUM_STD: f64 = 2.0;

/// MACD spans (fast/slow/signal).
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// RSI trailing window.
pub const RSI_PERIOD: usize = 15;

/// Enrich an ordered raw series with every derived column.
///
/// Fails only when `bars` is empty; indicators whose window has not filled
/// yet report `None` for the affected indices instead of erroring.
pub fn enrich(bars: &[RawBar]) -> Result<Vec<EnrichedBar>, EngineError> {
    if bars.is_empty() {
        return Err(EngineError::InsufficientData);
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let sma_5 = sma::calculate_sma(&closes, 5);
    let sma_10 = sma::calculate_sma(&closes, 10);
    let sma_50 = sma::calculate_sma(&closes, 50);
    let sma_100 = sma::calculate_sma(&closes, 100);
    let bands = bollinger::calculate_bollinger(&closes, BOLL_PERIOD, BOLL_NUM_STD);
    let macd = macd::calculate_macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let rsi_15 = rsi::calculate_rsi(&closes, RSI_PERIOD);
    let obv = obv::calculate_obv(bars);

    let enriched = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| EnrichedBar {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            sma_5: sma_5[i],
            sma_10: sma_10[i],
            sma_50: sma_50[i],
            sma_100: sma_100[i],
            boll_upper: bands.upper[i],
            boll_lower: bands.lower[i],
            macd: macd.macd[i],
            macd_signal: macd.signal[i],
            macd_histogram: macd.histogram[i],
            rsi_15: rsi_15[i],
            obv: obv[i],
        })
        .collect();

    Ok(enriched)
}

// =============================================================================
// Renderer-facing columnar table
// =============================================================================

/// Columnar view of an enriched series, shaped for the chart renderers.
///
/// `zeros` is an all-zero baseline column of the same length (the MACD
/// histogram bars hang from it), not a computed indicator. Warm-up gaps
/// serialise as `null`, never as `0`.
#[derive(Debug, Clone, Serialize)]
pub struct ChartTable {
    pub date: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub close: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub volume: Vec<u64>,
    #[serde(rename = "OBV")]
    pub obv: Vec<i64>,
    #[serde(rename = "SMA_5")]
    pub sma_5: Vec<Option<f64>>,
    #[serde(rename = "SMA_10")]
    pub sma_10: Vec<Option<f64>>,
    #[serde(rename = "SMA_50")]
    pub sma_50: Vec<Option<f64>>,
    #[serde(rename = "SMA_100")]
    pub sma_100: Vec<Option<f64>>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub rsi_15: Vec<Option<f64>>,
    pub boll_upper: Vec<Option<f64>>,
    pub boll_lower: Vec<Option<f64>>,
    pub zeros: Vec<f64>,
}

/// Pivot an enriched series into the columnar table renderers consume.
pub fn chart_table(bars: &[EnrichedBar]) -> ChartTable {
    ChartTable {
        date: bars.iter().map(|b| b.date).collect(),
        open: bars.iter().map(|b| b.open).collect(),
        close: bars.iter().map(|b| b.close).collect(),
        high: bars.iter().map(|b| b.high).collect(),
        low: bars.iter().map(|b| b.low).collect(),
        volume: bars.iter().map(|b| b.volume).collect(),
        obv: bars.iter().map(|b| b.obv).collect(),
        sma_5: bars.iter().map(|b| b.sma_5).collect(),
        sma_10: bars.iter().map(|b| b.sma_10).collect(),
        sma_50: bars.iter().map(|b| b.sma_50).collect(),
        sma_100: bars.iter().map(|b| b.sma_100).collect(),
        macd: bars.iter().map(|b| b.macd).collect(),
        macd_signal: bars.iter().map(|b| b.macd_signal).collect(),
        macd_histogram: bars.iter().map(|b| b.macd_histogram).collect(),
        rsi_15: bars.iter().map(|b| b.rsi_15).collect(),
        boll_upper: bars.iter().map(|b| b.boll_upper).collect(),
        boll_lower: bars.iter().map(|b| b.boll_lower).collect(),
        zeros: vec![0.0; bars.len()],
    }
}
