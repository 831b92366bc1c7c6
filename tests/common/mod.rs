//! Shared test utilities: price builders and in-memory collaborators.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use wavecount::chart::{ChartSink, chart_file_name};
use wavecount::indicators::IndicatorRow;
use wavecount::models::PricePoint;
use wavecount::provider::PriceHistory;
use wavecount::waves::WaveSet;
use wavecount::{Result, WavecountError};

/// 2024-01-01T00:00:00Z in milliseconds.
pub const START_MS: i64 = 1_704_067_200_000;
pub const DAY_MS: i64 = 86_400_000;

/// Builds one daily point per close, starting at [`START_MS`].
pub fn daily_points(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            timestamp: DateTime::<Utc>::from_timestamp_millis(START_MS + i as i64 * DAY_MS)
                .expect("timestamp in range"),
            close,
        })
        .collect()
}

/// Closes that move by `step` (e.g. `0.12` for +12%) `moves` times.
pub fn compounding(start: f64, step: f64, moves: usize) -> Vec<f64> {
    std::iter::successors(Some(start), |c| Some(c * (1.0 + step)))
        .take(moves + 1)
        .collect()
}

/// Canned outcome for one asset.
#[derive(Clone)]
pub enum Canned {
    Points(Vec<f64>),
    NoData,
    Failure(&'static str),
    Panic,
}

/// In-memory [`PriceHistory`] keyed by asset name.
#[derive(Default)]
pub struct StubProvider {
    responses: HashMap<String, Canned>,
    pub requests: Mutex<Vec<(String, String, u32)>>,
}

impl StubProvider {
    pub fn with(mut self, asset: &str, canned: Canned) -> Self {
        self.responses.insert(asset.to_string(), canned);
        self
    }
}

impl PriceHistory for StubProvider {
    async fn fetch_history(
        &self,
        asset: &str,
        quote_currency: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>> {
        self.requests
            .lock()
            .unwrap()
            .push((asset.to_string(), quote_currency.to_string(), days));

        match self.responses.get(asset).cloned() {
            Some(Canned::Points(closes)) if closes.len() < 2 => {
                Err(WavecountError::InsufficientData {
                    points: closes.len(),
                })
            }
            Some(Canned::Points(closes)) => Ok(daily_points(&closes)),
            Some(Canned::Failure(reason)) => Err(WavecountError::FetchFailure(reason.into())),
            Some(Canned::Panic) => panic!("provider exploded"),
            Some(Canned::NoData) | None => Err(WavecountError::NoDataFound {
                asset: asset.to_string(),
            }),
        }
    }
}

/// [`ChartSink`] that records calls instead of drawing.
#[derive(Default)]
pub struct RecordingSink {
    pub rendered: Mutex<Vec<(String, usize, usize)>>,
}

impl ChartSink for RecordingSink {
    fn render(&self, asset: &str, rows: &[IndicatorRow], waves: &WaveSet) -> Result<PathBuf> {
        self.rendered
            .lock()
            .unwrap()
            .push((asset.to_string(), rows.len(), waves.len()));
        Ok(PathBuf::from("charts").join(chart_file_name(asset)))
    }
}
