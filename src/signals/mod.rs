// =============================================================================
// Signals Module
// =============================================================================
//
// Classification layer on top of the raw indicator series:
// - Per-indicator tri-state signals (RSI thresholds, Bollinger band position,
//   MACD / histogram sign agreement)
// - Majority-vote composite aggregation across the available signals
// - One-call technical summary for a whole price window

pub mod composite;
pub mod summary;

pub use composite::{aggregate_signals, bollinger_signal, macd_signal, rsi_signal, CompositeResult};
pub use summary::{build_summary, TechnicalSummary};
