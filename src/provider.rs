//! Price-history retrieval from the CoinGecko REST API.
//!
//! [`CoinGeckoClient`] resolves the asset name in two steps: a fixed alias
//! table for names CoinGecko does not know directly, then a one-shot
//! `/search` lookup if the first `market_chart` request comes back empty.

use std::future::Future;

use reqwest::StatusCode;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::Result;
use crate::config::CoinGeckoConfig;
use crate::models::PricePoint;
use crate::models::coingecko::{MarketChartResponse, SearchResponse};

/// Header carrying a CoinGecko demo API key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Known names that differ from their CoinGecko identifier.
const ALIASES: &[(&str, &str)] = &[
    ("velodrome", "velodrome-finance"),
    ("velo", "velodrome-finance"),
    ("velero", "velodrome-finance"),
];

/// Source of historical close prices.
pub trait PriceHistory {
    /// Returns at least two points, oldest first.
    ///
    /// # Errors
    ///
    /// [`FetchFailure`](crate::WavecountError::FetchFailure) if the request
    /// fails, [`NoDataFound`](crate::WavecountError::NoDataFound) if the
    /// asset has no history and
    /// [`InsufficientData`](crate::WavecountError::InsufficientData) if it
    /// has fewer than two points.
    fn fetch_history(
        &self,
        asset: &str,
        quote_currency: &str,
        days: u32,
    ) -> impl Future<Output = Result<Vec<PricePoint>>> + Send;
}

/// Maps an asset name to its CoinGecko identifier via [`ALIASES`].
pub fn resolve_alias(asset: &str) -> String {
    let asset = asset.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == asset)
        .map(|(_, id)| (*id).to_string())
        .unwrap_or(asset)
}

/// Decodes a `market_chart` body.
///
/// # Errors
///
/// Returns [`FetchFailure`](crate::WavecountError::FetchFailure) if the body
/// is not valid JSON of the expected shape or holds an invalid timestamp.
pub fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>> {
    let chart: MarketChartResponse = serde_json::from_str(body)
        .map_err(|e| crate::WavecountError::FetchFailure(format!("malformed market chart: {e}")))?;
    chart.into_points().ok_or_else(|| {
        crate::WavecountError::FetchFailure("market chart contains an invalid timestamp".into())
    })
}

/// Decodes a `search` body and returns the first coin's identifier.
///
/// # Errors
///
/// Returns [`FetchFailure`](crate::WavecountError::FetchFailure) if the body
/// is not valid JSON of the expected shape.
pub fn parse_search(body: &str) -> Result<Option<String>> {
    let search: SearchResponse = serde_json::from_str(body)
        .map_err(|e| crate::WavecountError::FetchFailure(format!("malformed search result: {e}")))?;
    Ok(search.best_match().map(String::from))
}

/// HTTP client for the CoinGecko v3 API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    base_url: String,
    api_key: Option<Zeroizing<String>>,
    client: reqwest::Client,
}

impl CoinGeckoClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`](crate::WavecountError::FetchFailure) if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &CoinGeckoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("wavecount/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                crate::WavecountError::FetchFailure(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    /// GETs `url` and returns the body, or `None` on 404.
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<Option<String>> {
        let mut request = self.client.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| crate::WavecountError::FetchFailure(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url, "resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(crate::WavecountError::FetchFailure(format!(
                "{url} returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| crate::WavecountError::FetchFailure(e.to_string()))?;
        Ok(Some(body))
    }

    async fn market_chart(
        &self,
        coin_id: &str,
        quote_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>> {
        let url = format!("{}/coins/{coin_id}/market_chart", self.base_url);
        let days = days.to_string();
        debug!(url = %url, vs_currency = quote_currency, days = %days, "requesting market chart");

        let Some(body) = self
            .get_text(&url, &[("vs_currency", quote_currency), ("days", &days)])
            .await?
        else {
            return Ok(Vec::new());
        };

        let points = parse_market_chart(&body)?;
        debug!(coin_id, points = points.len(), "received market chart");
        Ok(points)
    }

    async fn search(&self, query: &str) -> Result<Option<String>> {
        let url = format!("{}/search", self.base_url);
        match self.get_text(&url, &[("query", query)]).await? {
            Some(body) => parse_search(&body),
            None => Ok(None),
        }
    }
}

impl PriceHistory for CoinGeckoClient {
    async fn fetch_history(
        &self,
        asset: &str,
        quote_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>> {
        let coin_id = resolve_alias(asset);
        let mut points = self.market_chart(&coin_id, quote_currency, days).await?;

        if points.is_empty() {
            warn!(asset, coin_id = %coin_id, "no prices returned, searching for coin id");
            if let Some(found) = self.search(asset).await? {
                info!(asset, coin_id = %found, "retrying with search result");
                points = self.market_chart(&found, quote_currency, days).await?;
            }
        }

        if points.is_empty() {
            return Err(crate::WavecountError::NoDataFound {
                asset: asset.to_string(),
            });
        }
        if points.len() < 2 {
            return Err(crate::WavecountError::InsufficientData {
                points: points.len(),
            });
        }

        info!(asset, points = points.len(), "fetched price history");
        Ok(points)
    }
}
