// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes on a 0-100
// scale to flag overbought / oversold conditions.
//
// Step 1 — Compute price deltas from consecutive closes; split into gains
//          (positive deltas) and losses (absolute negative deltas).
// Step 2 — Seed average gain / average loss with the SMA of the first
//          `period` gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI > 70 => overbought (SELL),  RSI < 30 => oversold (BUY).

use crate::indicators::IndicatorSeries;

/// Substituted for a zero average loss before dividing.  This mirrors the
/// dashboard's historical behaviour and is an approximation, not a true
/// mathematical limit: an all-gain window yields RSI ~99.9 rather than a
/// clamped 100.
pub const RSI_EPSILON: f64 = 0.001;

/// Compute the full RSI series for `prices` and `period`.
///
/// The result has the same length as `prices`.  The first `period` entries
/// are `None`: one index is consumed by differencing and `period - 1` more
/// by the seed average, so RSI is first defined at index `period`.
///
/// # Edge cases
/// - `period == 0` or `prices.len() < period + 1` => all-`None` series
/// - Zero average loss substitutes [`RSI_EPSILON`] (documented approximation).
pub fn calculate_rsi(prices: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || prices.len() < period + 1 {
        return vec![None; prices.len()];
    }

    // --- Deltas split into gains and losses ----------------------------------
    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|&d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|&d| (-d).max(0.0)).collect();

    // --- Seed averages from the first `period` deltas ------------------------
    let period_f = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / period_f;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period_f;

    let mut result: IndicatorSeries = vec![None; period];
    result.reserve(prices.len() - period);
    result.push(Some(rsi_from_averages(avg_gain, avg_loss)));

    // --- Wilder's smoothing for subsequent deltas ----------------------------
    for i in period..deltas.len() {
        avg_gain = (avg_gain * (period_f - 1.0) + gains[i]) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + losses[i]) / period_f;
        result.push(Some(rsi_from_averages(avg_gain, avg_loss)));
    }

    result
}

/// Most recent RSI value, if the series is long enough to define one.
pub fn current_rsi(prices: &[f64], period: usize) -> Option<f64> {
    calculate_rsi(prices, period).last().copied().flatten()
}

/// Convert average gain / average loss into an RSI value in (0, 100).
///
/// A zero average loss is replaced by [`RSI_EPSILON`] to avoid division by
/// zero, which pushes RSI toward (but never exactly to) 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let divisor = if avg_loss == 0.0 { RSI_EPSILON } else { avg_loss };
    let rs = avg_gain / divisor;
    100.0 - 100.0 / (1.0 + rs)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_period_zero() {
        assert_eq!(calculate_rsi(&[1.0, 2.0, 3.0], 0), vec![None, None, None]);
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes give only 13 deltas — not enough to seed a 14-period RSI.
        let prices: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(calculate_rsi(&prices, 14).iter().all(|v| v.is_none()));
    }

    #[test]
    fn rsi_warm_up_count() {
        let prices: Vec<f64> = (1..=40).map(|x| (x as f64).cos() + 10.0).collect();
        let rsi = calculate_rsi(&prices, 14);
        assert_eq!(rsi.len(), prices.len());
        assert_eq!(rsi.iter().filter(|v| v.is_none()).count(), 14);
        assert!(rsi[14].is_some());
    }

    #[test]
    fn rsi_strictly_increasing_near_100() {
        // All gains, zero losses => epsilon substitution => RSI just below 100.
        let prices: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let last = current_rsi(&prices, 14).unwrap();
        assert!(last > 99.0 && last < 100.0, "got {last}");
    }

    #[test]
    fn rsi_strictly_decreasing_is_zero() {
        let prices: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let last = current_rsi(&prices, 14).unwrap();
        assert!(last.abs() < 1e-10, "got {last}");
    }

    #[test]
    fn rsi_range_check() {
        let prices = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        for v in calculate_rsi(&prices, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn current_rsi_none_on_short_input() {
        assert!(current_rsi(&[1.0, 2.0], 14).is_none());
    }
}
