//! Synthetic OHLC candle model.

use chrono::{DateTime, Utc};

/// A candlestick bar reconstructed from a close-only series.
///
/// `open` is the previous point's close; `high` and `low` span the closes of
/// this point and up to three predecessors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
