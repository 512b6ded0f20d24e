// =============================================================================
// Per-indicator classification and majority-vote aggregation
// =============================================================================
//
// Each classifier looks only at the most recent reading.  The composite vote
// counts BUY against SELL across whichever of the up-to-three indicators are
// available and requires a strict majority (> 0.5) to leave NEUTRAL.

use serde::Serialize;

use crate::types::Signal;

/// RSI level above which the market is considered overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI level below which the market is considered oversold.
pub const RSI_OVERSOLD: f64 = 30.0;

/// Classify an RSI reading: above 70 overbought (SELL), below 30 oversold
/// (BUY), otherwise NEUTRAL.  Both thresholds are strict.
pub fn rsi_signal(value: f64) -> Signal {
    if value > RSI_OVERBOUGHT {
        Signal::Sell
    } else if value < RSI_OVERSOLD {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

/// Classify the latest price against the latest Bollinger band pair: above
/// the upper band SELL, below the lower band BUY, inside NEUTRAL.
pub fn bollinger_signal(last_price: f64, upper: f64, lower: f64) -> Signal {
    if last_price > upper {
        Signal::Sell
    } else if last_price < lower {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

/// Classify the latest MACD reading.
///
/// BUY requires both the MACD line and the histogram positive; SELL requires
/// both negative.  An undefined histogram (signal line still warming up)
/// classifies as NEUTRAL.
pub fn macd_signal(last_macd: f64, last_histogram: Option<f64>) -> Signal {
    match last_histogram {
        Some(h) if last_macd > 0.0 && h > 0.0 => Signal::Buy,
        Some(h) if last_macd < 0.0 && h < 0.0 => Signal::Sell,
        _ => Signal::Neutral,
    }
}

/// Result of the majority vote across the available indicator signals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompositeResult {
    pub buy_count: u32,
    pub sell_count: u32,
    /// Number of indicators that contributed a vote.
    pub total: u32,
    pub overall: Signal,
}

/// Aggregate the up-to-three indicator signals into an overall verdict.
///
/// Absent indicators (`None`) are excluded from the vote entirely.  The RSI
/// vote is taken from the raw value via [`rsi_signal`].  With no indicators
/// available at all the verdict is NEUTRAL with `total == 0` — there is no
/// ratio to divide.
pub fn aggregate_signals(
    rsi_value: Option<f64>,
    bollinger: Option<Signal>,
    macd: Option<Signal>,
) -> CompositeResult {
    let votes = [
        rsi_value.map(rsi_signal),
        bollinger,
        macd,
    ];

    let mut buy_count = 0u32;
    let mut sell_count = 0u32;
    let mut total = 0u32;

    for vote in votes.into_iter().flatten() {
        total += 1;
        match vote {
            Signal::Buy => buy_count += 1,
            Signal::Sell => sell_count += 1,
            Signal::Neutral => {}
        }
    }

    let overall = if total == 0 {
        Signal::Neutral
    } else {
        let total_f = f64::from(total);
        if f64::from(buy_count) / total_f > 0.5 {
            Signal::Buy
        } else if f64::from(sell_count) / total_f > 0.5 {
            Signal::Sell
        } else {
            Signal::Neutral
        }
    };

    CompositeResult {
        buy_count,
        sell_count,
        total,
        overall,
    }
}
