// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators shown on the
// dashboard.  Windowed indicators return one `Option<f64>` per input index so
// warm-up gaps stay distinguishable from computed zeros; series that are
// total from the first bar (EMA, MACD, OBV) return plain values.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
