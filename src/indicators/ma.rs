// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// The arithmetic mean over a trailing window of exactly `period` points:
//   MA[i] = mean(P[i - period + 1 ..= i])
//
// The first `period - 1` indices have no full window behind them and are
// therefore undefined.

use crate::indicators::IndicatorSeries;

/// Compute the simple moving average of `prices` over `period`.
///
/// The result has the same length as `prices`; the first `period - 1`
/// entries are `None`.
///
/// # Edge cases
/// - `period == 0` or `period > prices.len()` => all-`None` series
/// - empty input => empty series
pub fn calculate_ma(prices: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || period > prices.len() {
        return vec![None; prices.len()];
    }

    let mut result: IndicatorSeries = vec![None; period - 1];
    result.reserve(prices.len() - period + 1);

    let period_f = period as f64;
    for window in prices.windows(period) {
        result.push(Some(window.iter().sum::<f64>() / period_f));
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ma_empty_input() {
        assert!(calculate_ma(&[], 5).is_empty());
    }

    #[test]
    fn ma_period_zero() {
        assert_eq!(calculate_ma(&[1.0, 2.0, 3.0], 0), vec![None, None, None]);
    }

    #[test]
    fn ma_period_exceeds_length() {
        assert_eq!(calculate_ma(&[1.0, 2.0], 5), vec![None, None]);
    }

    #[test]
    fn ma_known_values() {
        // MA([10, 20, 30], 2) = [None, 15, 25]
        let ma = calculate_ma(&[10.0, 20.0, 30.0], 2);
        assert_eq!(ma, vec![None, Some(15.0), Some(25.0)]);
    }

    #[test]
    fn ma_warm_up_count() {
        // For |P| >= p there are exactly p-1 undefined and |P|-p+1 defined.
        let prices: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        for period in 1..=30 {
            let ma = calculate_ma(&prices, period);
            assert_eq!(ma.len(), prices.len());
            assert_eq!(ma.iter().filter(|v| v.is_none()).count(), period - 1);
            assert_eq!(
                ma.iter().filter(|v| v.is_some()).count(),
                prices.len() - period + 1
            );
        }
    }

    #[test]
    fn ma_period_one_is_identity() {
        let prices = vec![3.5, 7.25, 1.0];
        let ma = calculate_ma(&prices, 1);
        assert_eq!(ma, vec![Some(3.5), Some(7.25), Some(1.0)]);
    }

    #[test]
    fn ma_flat_series() {
        let ma = calculate_ma(&[50.0; 10], 4);
        for v in ma.iter().skip(3) {
            assert!((v.unwrap() - 50.0).abs() < 1e-12);
        }
    }
}
