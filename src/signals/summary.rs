// =============================================================================
// Technical Summary — one snapshot across all indicators
// =============================================================================
//
// Evaluates RSI, Bollinger Bands, MACD, and pivot levels over a single price
// window and folds the latest readings into the composite vote.  Indicators
// whose warm-up exceeds the window simply report absent and drop out of the
// vote; the summary itself only needs a non-empty window.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::IndicatorParams;
use crate::indicators::bollinger::calculate_bollinger;
use crate::indicators::macd::calculate_macd;
use crate::indicators::pivot::{calculate_pivots, PivotLevels};
use crate::indicators::rsi::current_rsi;
use crate::signals::composite::{
    aggregate_signals, bollinger_signal, macd_signal, rsi_signal, CompositeResult,
};
use crate::types::Signal;

/// Latest RSI reading with its classification.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RsiSnapshot {
    pub value: f64,
    pub signal: Signal,
}

/// Latest Bollinger reading with its classification.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BollingerSnapshot {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
    /// Position of the last price within the bands, as a percentage.
    /// Absent when `upper == lower` (zero-volatility window).
    pub percent_position: Option<f64>,
    pub signal: Signal,
}

/// Latest MACD reading with its classification.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MacdSnapshot {
    pub macd: f64,
    pub signal_line: Option<f64>,
    pub histogram: Option<f64>,
    pub signal: Signal,
}

/// Full technical snapshot for one price window.
#[derive(Debug, Clone, Serialize)]
pub struct TechnicalSummary {
    pub last_price: f64,
    pub rsi: Option<RsiSnapshot>,
    pub bollinger: Option<BollingerSnapshot>,
    pub macd: Option<MacdSnapshot>,
    pub pivots: Option<PivotLevels>,
    pub composite: CompositeResult,
    pub computed_at: DateTime<Utc>,
}

/// Build the technical summary for `prices` using the given look-back
/// parameters.  Returns `None` for an empty window.
pub fn build_summary(prices: &[f64], params: &IndicatorParams) -> Option<TechnicalSummary> {
    let last_price = *prices.last()?;

    // ── RSI ──────────────────────────────────────────────────────────────
    let rsi = current_rsi(prices, params.rsi_period).map(|value| RsiSnapshot {
        value,
        signal: rsi_signal(value),
    });

    // ── Bollinger ────────────────────────────────────────────────────────
    let bands = calculate_bollinger(prices, params.bollinger_period, params.bollinger_std_dev);
    let bollinger = bands.last_defined().map(|(middle, upper, lower)| {
        let percent_position = if upper == lower {
            None
        } else {
            Some((last_price - lower) / (upper - lower) * 100.0)
        };
        BollingerSnapshot {
            middle,
            upper,
            lower,
            percent_position,
            signal: bollinger_signal(last_price, upper, lower),
        }
    });

    // ── MACD ─────────────────────────────────────────────────────────────
    let macd_series = calculate_macd(
        prices,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );
    let macd = macd_series.last_macd().map(|value| {
        let histogram = macd_series.last_histogram();
        MacdSnapshot {
            macd: value,
            signal_line: macd_series.signal.last().copied().flatten(),
            histogram,
            signal: macd_signal(value, histogram),
        }
    });

    // ── Pivots & composite vote ──────────────────────────────────────────
    let pivots = calculate_pivots(prices);
    let composite = aggregate_signals(
        rsi.map(|r| r.value),
        bollinger.map(|b| b.signal),
        macd.map(|m| m.signal),
    );

    Some(TechnicalSummary {
        last_price,
        rsi,
        bollinger,
        macd,
        pivots,
        composite,
        computed_at: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> IndicatorParams {
        IndicatorParams::default()
    }

    #[test]
    fn summary_empty_window() {
        assert!(build_summary(&[], &params()).is_none());
    }

    #[test]
    fn summary_short_window_has_no_indicators() {
        // Five points: nothing warms up, but pivots and the verdict still exist.
        let summary = build_summary(&[10.0, 11.0, 9.0, 12.0, 10.5], &params()).unwrap();
        assert!(summary.rsi.is_none());
        assert!(summary.bollinger.is_none());
        assert!(summary.macd.is_none());
        assert!(summary.pivots.is_some());
        assert_eq!(summary.composite.total, 0);
        assert_eq!(summary.composite.overall, Signal::Neutral);
    }

    #[test]
    fn summary_full_window_populates_everything() {
        let prices: Vec<f64> = (1..=80)
            .map(|x| 100.0 + (x as f64 / 4.0).sin() * 5.0)
            .collect();
        let summary = build_summary(&prices, &params()).unwrap();
        assert!(summary.rsi.is_some());
        assert!(summary.bollinger.is_some());
        assert!(summary.macd.is_some());
        assert!(summary.pivots.is_some());
        assert_eq!(summary.composite.total, 3);
    }

    #[test]
    fn summary_flat_window_guards_percent_position() {
        // Zero volatility: upper == lower, so percent position must be absent.
        let summary = build_summary(&[50.0; 40], &params()).unwrap();
        let bb = summary.bollinger.unwrap();
        assert_eq!(bb.upper, bb.lower);
        assert!(bb.percent_position.is_none());
        assert_eq!(bb.signal, Signal::Neutral);
    }

    #[test]
    fn summary_percent_position_inside_bands() {
        let prices: Vec<f64> = (1..=40)
            .map(|x| 100.0 + (x as f64 / 3.0).sin() * 4.0)
            .collect();
        let summary = build_summary(&prices, &params()).unwrap();
        let bb = summary.bollinger.unwrap();
        let pct = bb.percent_position.unwrap();
        // Last price sits between the bands, so the position is within 0-100.
        if summary.last_price <= bb.upper && summary.last_price >= bb.lower {
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn summary_uptrend_rsi_overbought() {
        let prices: Vec<f64> = (1..=80).map(|x| x as f64).collect();
        let summary = build_summary(&prices, &params()).unwrap();
        let rsi = summary.rsi.unwrap();
        assert!(rsi.value > 99.0);
        assert_eq!(rsi.signal, Signal::Sell);
    }
}
