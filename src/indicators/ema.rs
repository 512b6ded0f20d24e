// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA weights recent prices more heavily than the SMA:
//   k      = 2 / (period + 1)
//   EMA[i] = P[i] * k + EMA[i-1] * (1 - k)
//
// The seed at index `period - 1` is the SMA of the first `period` points;
// everything before it is undefined.

use crate::indicators::IndicatorSeries;

/// Compute the EMA series for `prices` over `period`.
///
/// The result has the same length as `prices`, with the first `period - 1`
/// entries `None` and the SMA seed at index `period - 1`.
///
/// # Edge cases
/// - `period == 0` or `period > prices.len()` => all-`None` series
pub fn calculate_ema(prices: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || period > prices.len() {
        return vec![None; prices.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let sma = prices[..period].iter().sum::<f64>() / period as f64;

    let mut result: IndicatorSeries = vec![None; period - 1];
    result.reserve(prices.len() - period + 1);
    result.push(Some(sma));

    let mut prev = sma;
    for &price in &prices[period..] {
        let ema = price * k + prev * (1.0 - k);
        result.push(Some(ema));
        prev = ema;
    }

    result
}
