// =============================================================================
// Engine Configuration — indicator defaults and server settings
// =============================================================================
//
// Every tunable of the analysis engine lives here: default look-back periods
// for each indicator and the HTTP bind address.  All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an
// older config file; an absent or malformed file falls back to defaults with
// a logged warning at the call site.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_address() -> String {
    "0.0.0.0:8090".to_string()
}

fn default_ma_period() -> usize {
    20
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_std_dev() -> f64 {
    2.0
}

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

// =============================================================================
// Indicator parameters
// =============================================================================

/// Default look-back parameters used when a request does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    #[serde(default = "default_ma_period")]
    pub ma_period: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    #[serde(default = "default_bollinger_std_dev")]
    pub bollinger_std_dev: f64,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_period: default_ma_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_std_dev: default_bollinger_std_dev(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Address the HTTP API binds to.  Overridable via `MARKETPULSE_BIND`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Indicator look-back defaults.
    #[serde(default)]
    pub indicators: IndicatorParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            indicators: IndicatorParams::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist or fails to parse, returns an error so the
    /// caller can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_address = %config.bind_address,
            "engine config loaded"
        );

        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.bind_address, "0.0.0.0:8090");
        assert_eq!(cfg.indicators.ma_period, 20);
        assert_eq!(cfg.indicators.bollinger_period, 20);
        assert!((cfg.indicators.bollinger_std_dev - 2.0).abs() < 1e-12);
        assert_eq!(cfg.indicators.rsi_period, 14);
        assert_eq!(cfg.indicators.macd_fast, 12);
        assert_eq!(cfg.indicators.macd_slow, 26);
        assert_eq!(cfg.indicators.macd_signal, 9);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.bind_address, EngineConfig::default().bind_address);
        assert_eq!(cfg.indicators.rsi_period, 14);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{"indicators": {"rsi_period": 21}}"#).unwrap();
        assert_eq!(cfg.indicators.rsi_period, 21);
        assert_eq!(cfg.indicators.ma_period, 20);
        assert_eq!(cfg.bind_address, "0.0.0.0:8090");
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(EngineConfig::load("/nonexistent/engine_config.json").is_err());
    }
}
