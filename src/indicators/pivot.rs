// =============================================================================
// Pivot Point Support / Resistance
// =============================================================================
//
// Classic pivot levels over one price window, using the window's minimum and
// maximum in place of intraday high/low:
//
//   pivot = (max + min + last) / 3
//   R1 = 2*pivot - min    S1 = 2*pivot - max
//   R2 = pivot + range    S2 = pivot - range
//   R3 = R2 + range       S3 = S2 - range
//
// Scalar computation over a snapshot; there is no warm-up concept.

use serde::Serialize;

/// Pivot point plus three resistance and three support levels.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PivotLevels {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

/// Compute pivot support/resistance levels for `prices`.
///
/// Returns `None` for an empty window.
pub fn calculate_pivots(prices: &[f64]) -> Option<PivotLevels> {
    let last = *prices.last()?;
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let pivot = (max + min + last) / 3.0;

    let r1 = 2.0 * pivot - min;
    let r2 = pivot + range;
    let r3 = r2 + range;

    let s1 = 2.0 * pivot - max;
    let s2 = pivot - range;
    let s3 = s2 - range;

    Some(PivotLevels {
        pivot,
        r1,
        r2,
        r3,
        s1,
        s2,
        s3,
    })
}
