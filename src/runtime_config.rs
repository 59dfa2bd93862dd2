// =============================================================================
// Runtime Configuration — dashboard settings with atomic save
// =============================================================================
//
// Every field carries a serde default so that loading an older config file
// never breaks when new fields are added.  Persistence uses a tmp + rename
// pattern so a crash mid-write cannot corrupt the file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_api_base() -> String {
    "https://api.iextrading.com/1.0".to_string()
}

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_chart_range() -> String {
    "6m".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the dashboard backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Base URL of the chart data API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Symbol selected before the first render, so the session buffer is
    /// never exposed empty.
    #[serde(default = "default_symbol")]
    pub default_symbol: String,

    /// History range requested per selection (`6m` = trailing six months of
    /// daily bars).
    #[serde(default = "default_chart_range")]
    pub chart_range: String,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            default_symbol: default_symbol(),
            chart_range: default_chart_range(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            api_base = %config.api_base,
            default_symbol = %config.default_symbol,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    ///
    /// This prevents corruption if the process crashes mid-write.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        // Atomic write: write to a temporary sibling file, then rename.
        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}
