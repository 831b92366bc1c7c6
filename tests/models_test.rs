//! Deserialization tests for the CoinGecko response models.

use chrono::{DateTime, Utc};

use wavecount::WavecountError;
use wavecount::analysis::analyze;
use wavecount::interpret::Recommendation;
use wavecount::models::coingecko::{MarketChartResponse, SearchResponse};
use wavecount::provider::{parse_market_chart, parse_search};

const MARKET_CHART_JSON: &str = include_str!("fixtures/market_chart.json");
const MARKET_CHART_NOT_FOUND_JSON: &str = include_str!("fixtures/market_chart_not_found.json");
const SEARCH_JSON: &str = include_str!("fixtures/search.json");
const SEARCH_EMPTY_JSON: &str = include_str!("fixtures/search_empty.json");

#[test]
fn test_market_chart_response_deserializes() {
    let response: MarketChartResponse =
        serde_json::from_str(MARKET_CHART_JSON).expect("Failed to deserialize market chart");

    assert_eq!(response.prices.len(), 6);
    assert_eq!(response.prices[0], [1_704_067_200_000.0, 42280.2347]);
}

#[test]
fn test_market_chart_converts_to_points() {
    let points = parse_market_chart(MARKET_CHART_JSON).expect("Failed to parse market chart");

    assert_eq!(points.len(), 6);
    assert_eq!(
        points[0].timestamp,
        DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap()
    );
    assert_eq!(points[0].close, 42280.2347);
    assert_eq!(points[5].close, 44162.6915);
    assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn test_market_chart_fixture_analysis() {
    let points = parse_market_chart(MARKET_CHART_JSON).unwrap();
    let analysis = analyze("bitcoin", &points).unwrap();

    assert_eq!(analysis.rows.len(), 5);
    assert_eq!(analysis.waves.labels(), vec!["Correction A", "Impulse 1"]);
    assert_eq!(
        analysis.interpretation.recommendation,
        Recommendation::Neutral
    );
    assert_eq!(analysis.current_price(), 44162.6915);
}

#[test]
fn test_not_found_body_has_no_prices() {
    let points = parse_market_chart(MARKET_CHART_NOT_FOUND_JSON).unwrap();
    assert!(points.is_empty());
}

#[test]
fn test_invalid_timestamp_is_fetch_failure() {
    let err = parse_market_chart(r#"{"prices": [[1e300, 1.0], [1e300, 2.0]]}"#).unwrap_err();
    assert!(matches!(err, WavecountError::FetchFailure(_)));
}

#[test]
fn test_truncated_pair_is_fetch_failure() {
    let err = parse_market_chart(r#"{"prices": [[1704067200000]]}"#).unwrap_err();
    assert!(matches!(err, WavecountError::FetchFailure(_)));
}

#[test]
fn test_search_response_deserializes() {
    let response: SearchResponse =
        serde_json::from_str(SEARCH_JSON).expect("Failed to deserialize search response");

    assert_eq!(response.coins.len(), 2);
    assert_eq!(response.coins[0].id, "velodrome-finance");
    assert_eq!(response.coins[0].name, "Velodrome Finance");
    assert_eq!(response.coins[0].symbol, "VELO");
    assert_eq!(response.coins[0].market_cap_rank, Some(312));
    assert_eq!(response.coins[1].market_cap_rank, None);
}

#[test]
fn test_search_picks_first_coin() {
    assert_eq!(
        parse_search(SEARCH_JSON).unwrap().as_deref(),
        Some("velodrome-finance")
    );
    assert_eq!(parse_search(SEARCH_EMPTY_JSON).unwrap(), None);
}
