//! Synthetic candle construction from a close-only price series.

use crate::Result;
use crate::models::PricePoint;
use crate::models::candle::Candle;

/// Number of closes (current plus predecessors) spanned by `high`/`low`.
pub const HIGH_LOW_WINDOW: usize = 4;

/// Builds one [`Candle`] per point after the first.
///
/// The first point has no previous close to open from and is dropped, so
/// `n` points yield `n - 1` candles. `high` and `low` cover the trailing
/// [`HIGH_LOW_WINDOW`] closes, clipped at the start of the series.
///
/// # Errors
///
/// Returns [`WavecountError::InsufficientData`](crate::WavecountError::InsufficientData)
/// if fewer than two points are supplied.
pub fn build_candles(points: &[PricePoint]) -> Result<Vec<Candle>> {
    if points.len() < 2 {
        return Err(crate::WavecountError::InsufficientData {
            points: points.len(),
        });
    }

    let candles = (1..points.len())
        .map(|i| {
            let window = &points[i.saturating_sub(HIGH_LOW_WINDOW - 1)..=i];
            let (low, high) = window
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p.close), hi.max(p.close))
                });
            Candle {
                timestamp: points[i].timestamp,
                open: points[i - 1].close,
                high,
                low,
                close: points[i].close,
            }
        })
        .collect();

    Ok(candles)
}
