// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind the
// analysis dashboard.  Every function maps a price slice (ascending by
// trading-day position) to either a full-length output series or a scalar
// summary.
//
// Output series always have the SAME length as the input: warm-up indices
// for which no value can be computed yet hold `None`, never zero.  Degenerate
// parameters (`period == 0`, `period > len`) yield an all-`None` series so
// callers are never handed a silently truncated result.

pub mod bollinger;
pub mod ema;
pub mod ma;
pub mod macd;
pub mod pivot;
pub mod rsi;

/// A full-length derived series: `None` marks warm-up indices where no value
/// is defined yet.
pub type IndicatorSeries = Vec<Option<f64>>;
