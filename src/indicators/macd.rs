// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line  = EMA(fast) - EMA(slow), defined wherever both EMAs are.
// Signal line = EMA(signal_period) over the COMPACTED MACD line (undefined
//               entries stripped), re-padded with leading `None` so it lines
//               up with the original index space again.
// Histogram  = MACD - signal, wherever both are defined.
//
// Conventional periods are 12 / 26 / 9.

use crate::indicators::ema::calculate_ema;
use crate::indicators::IndicatorSeries;

/// The three parallel series produced by a MACD calculation.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl MacdSeries {
    /// Most recent MACD-line value, if defined.
    pub fn last_macd(&self) -> Option<f64> {
        self.macd.last().copied().flatten()
    }

    /// Most recent histogram value, if defined.
    pub fn last_histogram(&self) -> Option<f64> {
        self.histogram.last().copied().flatten()
    }
}

/// Compute the MACD line, signal line, and histogram for `prices`.
///
/// All three output series have the same length as `prices`.  The MACD line
/// is first defined at index `slow - 1`; the signal line needs a further
/// `signal_period - 1` defined MACD values on top of that.
///
/// # Edge cases
/// - Too little data for the slow EMA => all three series all-`None`
/// - Enough data for the MACD line but not the signal line => signal and
///   histogram stay all-`None` while the MACD line is populated.
pub fn calculate_macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let ema_fast = calculate_ema(prices, fast);
    let ema_slow = calculate_ema(prices, slow);

    let macd: IndicatorSeries = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    // Strip the warm-up region, run the EMA over what remains, then restore
    // the original alignment by prepending the stripped count.
    let compacted: Vec<f64> = macd.iter().copied().flatten().collect();
    let signal_compact = calculate_ema(&compacted, signal_period);

    let pad = macd.len() - signal_compact.len();
    let mut signal: IndicatorSeries = vec![None; pad];
    signal.extend(signal_compact);

    let histogram: IndicatorSeries = macd
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}
