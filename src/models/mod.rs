//! Shared data models.
//!
//! [`PricePoint`] is the raw input every analysis starts from; the
//! [`candle`] and [`coingecko`] submodules hold the derived candle record and
//! the CoinGecko wire types.

pub mod candle;
pub mod coingecko;

use chrono::{DateTime, Utc};

/// One observation of an asset's closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PricePoint {
    /// Builds a point from a millisecond Unix timestamp.
    ///
    /// Returns `None` if the timestamp is out of range.
    pub fn from_millis(timestamp_ms: i64, close: f64) -> Option<Self> {
        Some(Self {
            timestamp: DateTime::from_timestamp_millis(timestamp_ms)?,
            close,
        })
    }
}
