// =============================================================================
// Bollinger Bands
// =============================================================================
//
// A middle band (SMA over `period`) flanked by an upper and a lower band at
// +/- `num_std` population standard deviations.  The deviation at index `i`
// is measured against the SAME trailing window that produced the middle band
// at `i`, with divisor `period` (population, not sample).
//
// All three series share the input length and the SMA warm-up region.

use crate::indicators::ma::calculate_ma;
use crate::indicators::IndicatorSeries;

/// The three parallel band series produced by a Bollinger calculation.
#[derive(Debug, Clone)]
pub struct BandSet {
    pub middle: IndicatorSeries,
    pub upper: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BandSet {
    /// The most recent index where all three bands are defined, as a
    /// `(middle, upper, lower)` triple.
    pub fn last_defined(&self) -> Option<(f64, f64, f64)> {
        let middle = (*self.middle.last()?)?;
        let upper = (*self.upper.last()?)?;
        let lower = (*self.lower.last()?)?;
        Some((middle, upper, lower))
    }
}

/// Compute Bollinger Bands for `prices` over `period` with a `num_std`
/// standard-deviation multiplier (conventionally 2.0).
///
/// All three output series have the same length as `prices`, with the first
/// `period - 1` entries `None`.
///
/// # Edge cases
/// - `period == 0` or `period > prices.len()` => all-`None` band set
/// - A zero-volatility window yields `upper == lower == middle`; callers
///   dividing by the band width must guard that case themselves.
pub fn calculate_bollinger(prices: &[f64], period: usize, num_std: f64) -> BandSet {
    let middle = calculate_ma(prices, period);

    if period == 0 || period > prices.len() {
        return BandSet {
            upper: vec![None; prices.len()],
            lower: vec![None; prices.len()],
            middle,
        };
    }

    let mut upper: IndicatorSeries = vec![None; period - 1];
    let mut lower: IndicatorSeries = vec![None; period - 1];

    let period_f = period as f64;
    for window in prices.windows(period) {
        // Same trailing window and mean that produced the middle band here,
        // so the deviations are measured against the band itself.
        let mean = window.iter().sum::<f64>() / period_f;

        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f;
        let std_dev = variance.sqrt();

        upper.push(Some(mean + num_std * std_dev));
        lower.push(Some(mean - num_std * std_dev));
    }

    BandSet {
        middle,
        upper,
        lower,
    }
}
