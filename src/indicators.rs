//! Price delta, percentage change and RSI over a candle series.
//!
//! The RSI here averages gains and losses with a plain rolling mean rather
//! than Wilder's smoothing, so values differ from most charting packages.

use crate::models::candle::Candle;

/// Lookback of the momentum oscillator.
pub const RSI_PERIOD: usize = 14;

/// A candle plus the indicators derived from it.
///
/// Fields are `None` where the lookback is not yet satisfied: row 0 has no
/// previous close, and RSI needs [`RSI_PERIOD`] price changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRow {
    pub candle: Candle,
    pub price_change: Option<f64>,
    pub pct_change: Option<f64>,
    pub rsi: Option<f64>,
}

/// Computes indicator rows for a candle series.
///
/// An empty input yields an empty output.
pub fn compute(candles: &[Candle]) -> Vec<IndicatorRow> {
    let price_change: Vec<Option<f64>> = std::iter::once(None)
        .chain(candles.windows(2).map(|w| Some(w[1].close - w[0].close)))
        .take(candles.len())
        .collect();

    let rsi = rolling_rsi(&price_change, RSI_PERIOD);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let pct_change = price_change[i].map(|delta| delta / candles[i - 1].close);
            IndicatorRow {
                candle: *candle,
                price_change: price_change[i],
                pct_change,
                rsi: rsi[i],
            }
        })
        .collect()
}

/// Extracts the percentage-change column.
pub fn pct_changes(rows: &[IndicatorRow]) -> Vec<Option<f64>> {
    rows.iter().map(|row| row.pct_change).collect()
}

/// Simple-moving-average RSI.
///
/// A value exists only when all `period` trailing changes are defined.
/// A window with no losses reads 100.
fn rolling_rsi(changes: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    (0..changes.len())
        .map(|i| {
            if period == 0 || i + 1 < period {
                return None;
            }
            let window = &changes[i + 1 - period..=i];
            let (gain_sum, loss_sum) = window.iter().try_fold((0.0, 0.0), |(g, l), c| {
                let c = (*c)?;
                Some((g + c.max(0.0), l + (-c).max(0.0)))
            })?;

            let avg_gain = gain_sum / period as f64;
            let avg_loss = loss_sum / period as f64;
            if avg_loss == 0.0 {
                return Some(100.0);
            }
            let rs = avg_gain / avg_loss;
            Some(100.0 - 100.0 / (1.0 + rs))
        })
        .collect()
}
