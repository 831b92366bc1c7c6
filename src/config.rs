//! Application configuration loaded from environment variables.
//!
//! Every value has a default, so the tool runs with no environment at all:
//! - `COINGECKO_API_URL`: base URL of the CoinGecko v3 API
//! - `COINGECKO_API_KEY`: optional demo API key
//! - `WAVECOUNT_QUOTE_CURRENCY`: currency prices are quoted in
//! - `WAVECOUNT_DAYS`: how many days of history to request
//! - `WAVECOUNT_CHART_DIR`: directory charts are written to
//! - `WAVECOUNT_HTTP_TIMEOUT_SECS`: per-request timeout

use std::path::PathBuf;
use std::time::Duration;

use zeroize::Zeroizing;

/// Default public CoinGecko endpoint.
const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
const DEFAULT_QUOTE_CURRENCY: &str = "usd";
const DEFAULT_DAYS: u32 = 365;
const DEFAULT_CHART_DIR: &str = ".";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub coingecko: CoinGeckoConfig,
    pub analysis: AnalysisConfig,
}

/// Price-history provider settings.
#[derive(Debug)]
pub struct CoinGeckoConfig {
    pub api_url: String,
    pub api_key: Option<Zeroizing<String>>,
    pub timeout: Duration,
}

/// What to request and where to put the output.
#[derive(Debug)]
pub struct AnalysisConfig {
    pub quote_currency: String,
    pub days: u32,
    pub chart_dir: PathBuf,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`WavecountError::Config`](crate::WavecountError::Config) if
/// `WAVECOUNT_DAYS` or `WAVECOUNT_HTTP_TIMEOUT_SECS` is not a positive
/// integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let api_url = non_empty_var("COINGECKO_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_key = non_empty_var("COINGECKO_API_KEY").map(Zeroizing::new);

    let timeout_secs = positive_var("WAVECOUNT_HTTP_TIMEOUT_SECS")?
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

    let quote_currency = non_empty_var("WAVECOUNT_QUOTE_CURRENCY")
        .map(|q| q.to_lowercase())
        .unwrap_or_else(|| DEFAULT_QUOTE_CURRENCY.to_string());

    let days = match positive_var("WAVECOUNT_DAYS")? {
        Some(days) => u32::try_from(days).map_err(|_| {
            crate::WavecountError::Config(format!("WAVECOUNT_DAYS is too large: {days}"))
        })?,
        None => DEFAULT_DAYS,
    };

    let chart_dir = non_empty_var("WAVECOUNT_CHART_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_DIR));

    Ok(AppConfig {
        coingecko: CoinGeckoConfig {
            api_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        },
        analysis: AnalysisConfig {
            quote_currency,
            days,
            chart_dir,
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Parses an optional environment variable as a positive integer.
fn positive_var(name: &str) -> crate::Result<Option<u64>> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(crate::WavecountError::Config(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
        Ok(value) => Ok(Some(value)),
    }
}
