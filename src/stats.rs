// =============================================================================
// Series Statistics — window-level price summary
// =============================================================================
//
// Min / max / mean over a price window plus the overall percentage change
// from the first to the last price.  Backs the dashboard's data-summary line.

use serde::Serialize;

/// Summary statistics over one price window.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// `(last - first) / first * 100`; absent when the first price is zero.
    pub change_pct: Option<f64>,
}

/// Summarise `prices`.  Returns `None` for an empty window.
pub fn summarize(prices: &[f64]) -> Option<SeriesStats> {
    let first = *prices.first()?;
    let last = *prices.last()?;

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;

    let change_pct = if first == 0.0 {
        None
    } else {
        Some((last - first) / first * 100.0)
    };

    Some(SeriesStats {
        min,
        max,
        mean,
        change_pct,
    })
}
