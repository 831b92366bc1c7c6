//! CoinGecko REST response models.

use serde::Deserialize;

use super::PricePoint;

/// Body of `GET /coins/{id}/market_chart`.
///
/// Only `prices` is read. It is absent on error bodies such as
/// `{"error": "coin not found"}`, which deserialize to an empty series.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    /// `[timestamp_ms, close]` pairs, oldest first.
    #[serde(default)]
    pub prices: Vec<[f64; 2]>,
}

impl MarketChartResponse {
    /// Converts the raw pairs into [`PricePoint`]s.
    ///
    /// Returns `None` if any timestamp is not a valid millisecond instant.
    pub fn into_points(self) -> Option<Vec<PricePoint>> {
        self.prices
            .into_iter()
            .map(|[ts, close]| PricePoint::from_millis(ts as i64, close))
            .collect()
    }
}

/// Body of `GET /search?query=...`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchCoin>,
}

/// A single coin hit from the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchCoin {
    /// API identifier usable in `market_chart` requests.
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

impl SearchResponse {
    /// Returns the identifier of the best (first) hit.
    pub fn best_match(&self) -> Option<&str> {
        self.coins.first().map(|coin| coin.id.as_str())
    }
}
