// =============================================================================
// Error taxonomy — Stockboard dashboard backend
// =============================================================================
//
// Two failure kinds surface from a symbol selection: the chart source could
// not produce a series (FetchError) or the series it produced was empty
// (EngineError::InsufficientData). A windowed indicator that has not filled
// its window yet is *not* an error — it reports an absent value instead.
// =============================================================================

use thiserror::Error;

/// Failure to obtain data from the chart source.
///
/// Network failure, a non-success HTTP status, and a payload that does not
/// decode all collapse into this one kind — the dashboard does not
/// distinguish "symbol not found" from "API down".
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connect, timeout, TLS, ...).
    #[error("chart source request failed")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("chart source returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The body did not decode into bars / symbol entries.
    #[error("malformed payload from {url}: {reason}")]
    Payload { url: String, reason: String },
}

/// Failure inside the indicator engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The raw series was empty; nothing can be enriched.
    #[error("raw series is empty")]
    InsufficientData,
}

/// Failure of a `select_symbol` operation.
///
/// Either the fetch collaborator or the indicator engine failed; in both
/// cases the session buffer keeps its previous contents.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
