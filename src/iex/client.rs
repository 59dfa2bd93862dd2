// =============================================================================
// IEX-style chart data client — plain REST, no authentication
// =============================================================================
//
// Two endpoints back the dashboard: the per-symbol chart history and the
// symbol directory that fills the selection dropdown. Both are public; the
// only transport guard is the client-level request timeout.
// =============================================================================

use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::errors::FetchError;
use crate::session::ChartSource;
use crate::types::{RawBar, SymbolEntry};

/// Security type that marks a directory entry as not selectable.
const EXCLUDED_SYMBOL_TYPE: &str = "N/A";

/// REST client for the chart-history and symbol-directory endpoints.
#[derive(Clone)]
pub struct IexClient {
    base_url: String,
    client: reqwest::Client,
}

impl IexClient {
    /// Create a new client rooted at `base_url`
    /// (e.g. `https://api.iextrading.com/1.0`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");

        let base_url = base_url.into();
        debug!(base_url = %base_url, "IexClient initialised");

        Self { base_url, client }
    }

    /// GET /stock/{symbol}/chart/{range} — daily OHLCV history.
    #[instrument(skip(self), name = "iex::fetch_chart")]
    pub async fn fetch_chart(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<Vec<RawBar>, FetchError> {
        let url = format!("{}/stock/{}/chart/{}", self.base_url, symbol, range);
        let body = self.get_checked(&url).await?;

        let bars: Vec<RawBar> =
            serde_json::from_str(&body).map_err(|e| FetchError::Payload {
                url,
                reason: e.to_string(),
            })?;

        debug!(symbol, bars = bars.len(), "chart history retrieved");
        Ok(bars)
    }

    /// GET /ref-data/symbols — the full symbol directory.
    #[instrument(skip(self), name = "iex::fetch_symbols")]
    pub async fn fetch_symbols(&self) -> Result<Vec<SymbolEntry>, FetchError> {
        let url = format!("{}/ref-data/symbols", self.base_url);
        let body = self.get_checked(&url).await?;

        let entries: Vec<SymbolEntry> =
            serde_json::from_str(&body).map_err(|e| FetchError::Payload {
                url,
                reason: e.to_string(),
            })?;

        debug!(entries = entries.len(), "symbol directory retrieved");
        Ok(entries)
    }

    /// Issue a GET and return the body, mapping non-success statuses to
    /// [`FetchError::Status`].
    async fn get_checked(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, url, "chart source returned non-success status");
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(resp.text().await?)
    }
}

impl ChartSource for IexClient {
    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<Vec<RawBar>, FetchError> {
        IexClient::fetch_chart(self, symbol, range).await
    }
}

// =============================================================================
// Directory filtering
// =============================================================================

/// Filter the directory down to the selectable set: entries whose type is
/// `"N/A"` are excluded, everything else contributes its symbol.
pub fn selectable_symbols(entries: &[SymbolEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.kind != EXCLUDED_SYMBOL_TYPE)
        .map(|e| e.symbol.clone())
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn selectable_symbols_excludes_na_type() {
        let entries = vec![
            SymbolEntry {
                symbol: "AAPL".into(),
                kind: "cs".into(),
            },
            SymbolEntry {
                symbol: "ZEXIT".into(),
                kind: "N/A".into(),
            },
            SymbolEntry {
                symbol: "SPY".into(),
                kind: "et".into(),
            },
        ];

        assert_eq!(selectable_symbols(&entries), vec!["AAPL", "SPY"]);
    }

    #[test]
    fn selectable_symbols_empty_directory() {
        assert!(selectable_symbols(&[]).is_empty());
    }

    #[test]
    fn raw_bar_parses_chart_payload() {
        // Shape of one element of the chart endpoint's JSON array; extra
        // fields are ignored.
        let json = r#"{
            "date": "2024-03-04",
            "open": 180.12,
            "high": 182.50,
            "low": 179.80,
            "close": 181.30,
            "volume": 52345678,
            "unadjustedVolume": 52345678,
            "change": 1.18,
            "changePercent": 0.655,
            "label": "Mar 4",
            "changeOverTime": 0.0123
        }"#;

        let bar: RawBar = serde_json::from_str(json).expect("should parse");
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert!((bar.close - 181.30).abs() < f64::EPSILON);
        assert_eq!(bar.volume, 52_345_678);
    }

    #[test]
    fn raw_bar_rejects_missing_close() {
        let json = r#"{ "date": "2024-03-04", "open": 1.0, "high": 1.0, "low": 1.0, "volume": 10 }"#;
        assert!(serde_json::from_str::<RawBar>(json).is_err());
    }

    #[test]
    fn symbol_entry_parses_directory_payload() {
        let json = r#"{
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "date": "2024-03-04",
            "isEnabled": true,
            "type": "cs",
            "iexId": "2"
        }"#;

        let entry: SymbolEntry = serde_json::from_str(json).expect("should parse");
        assert_eq!(entry.symbol, "AAPL");
        assert_eq!(entry.kind, "cs");
    }
}
