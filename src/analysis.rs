//! One end-to-end analysis run: candles, indicators, waves, interpretation.

use tracing::debug;

use crate::Result;
use crate::candles::build_candles;
use crate::indicators::{self, IndicatorRow};
use crate::interpret::Interpretation;
use crate::models::PricePoint;
use crate::waves::{self, WaveSet};

/// Everything derived from one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub asset: String,
    pub rows: Vec<IndicatorRow>,
    pub waves: WaveSet,
    pub interpretation: Interpretation,
}

impl Analysis {
    /// Latest close in the analysed series.
    pub fn current_price(&self) -> f64 {
        self.interpretation.current_price
    }

    /// Plain-language report, see [`Interpretation::explain`].
    pub fn explain(&self) -> String {
        self.interpretation.explain(&self.asset)
    }
}

/// Runs the full pipeline over `points`.
///
/// # Errors
///
/// Returns [`WavecountError::InsufficientData`](crate::WavecountError::InsufficientData)
/// if fewer than two points are supplied.
pub fn analyze(asset: &str, points: &[PricePoint]) -> Result<Analysis> {
    let candles = build_candles(points)?;
    let rows = indicators::compute(&candles);
    let waves = waves::classify(&indicators::pct_changes(&rows));

    // build_candles guarantees at least one row.
    let current_price = rows
        .last()
        .map(|row| row.candle.close)
        .ok_or(crate::WavecountError::InsufficientData {
            points: points.len(),
        })?;

    let interpretation = Interpretation::new(&waves, current_price);
    debug!(
        asset,
        rows = rows.len(),
        waves = waves.len(),
        impulse = interpretation.impulse_count,
        corrective = interpretation.corrective_count,
        trend = %interpretation.trend,
        recommendation = %interpretation.recommendation,
        "analysis complete"
    );

    Ok(Analysis {
        asset: asset.to_string(),
        rows,
        waves,
        interpretation,
    })
}
