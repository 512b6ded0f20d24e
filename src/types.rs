// =============================================================================
// Shared types used across the MarketPulse analysis engine
// =============================================================================

use serde::Serialize;

/// Tri-state trading signal derived from an indicator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl Default for Signal {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}
