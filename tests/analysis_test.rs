//! End-to-end pipeline scenarios on hand-built price series.

mod common;

use wavecount::WavecountError;
use wavecount::analysis::analyze;
use wavecount::interpret::{Recommendation, Trend};
use wavecount::waves::{Magnitude, WaveKind};

use common::{compounding, daily_points};

#[test]
fn test_mixed_series_leans_corrective() {
    let closes = [100.0, 102.0, 108.0, 99.0, 95.0];
    let analysis = analyze("testcoin", &daily_points(&closes)).unwrap();

    let waves = analysis.waves.segments();
    assert_eq!(waves.len(), 3);

    assert_eq!(waves[0].kind, WaveKind::Impulse);
    assert_eq!(waves[0].magnitude, Magnitude::Significant);
    assert_eq!(waves[0].label, "Impulse 1");

    assert_eq!(waves[1].kind, WaveKind::Corrective);
    assert_eq!(waves[1].magnitude, Magnitude::Significant);
    assert_eq!(waves[1].label, "Correction A");

    assert_eq!(waves[2].kind, WaveKind::Corrective);
    assert_eq!(waves[2].magnitude, Magnitude::Minor);
    assert_eq!(waves[2].label, "Correction B");

    for wave in waves {
        assert_eq!(wave.start_index + 1, wave.end_index);
    }

    let interp = &analysis.interpretation;
    assert_eq!(interp.impulse_count, 1);
    assert_eq!(interp.corrective_count, 2);
    assert_eq!(interp.trend, Trend::Bullish);
    assert_eq!(interp.recommendation, Recommendation::HoldCaution);
    assert_eq!(analysis.current_price(), 95.0);
}

#[test]
fn test_recovery_from_zero_close_is_major_impulse() {
    let analysis = analyze("delisted", &daily_points(&[5.0, 0.0, 3.0])).unwrap();

    assert_eq!(analysis.rows[1].pct_change, Some(f64::INFINITY));
    assert_eq!(analysis.waves.labels(), vec!["Impulse 1"]);
    assert_eq!(analysis.waves.segments()[0].magnitude, Magnitude::Major);
    assert_eq!(
        analysis.interpretation.recommendation,
        Recommendation::StrongBuy
    );
}

#[test]
fn test_small_move_is_neutral() {
    let analysis = analyze("flatcoin", &daily_points(&[50.0, 50.5])).unwrap();

    assert!(analysis.waves.is_empty());
    assert_eq!(analysis.interpretation.impulse_count, 0);
    assert_eq!(analysis.interpretation.corrective_count, 0);
    assert_eq!(analysis.interpretation.trend, Trend::Bearish);
    assert_eq!(
        analysis.interpretation.recommendation,
        Recommendation::Neutral
    );
}

#[test]
fn test_sustained_rally_is_strong_buy() {
    let analysis = analyze("mooncoin", &daily_points(&compounding(10.0, 0.12, 9))).unwrap();

    let waves = analysis.waves.segments();
    assert!(!waves.is_empty());
    assert!(waves.iter().all(|w| w.kind == WaveKind::Impulse));
    assert!(waves.iter().all(|w| w.magnitude == Magnitude::Major));

    let labels = analysis.waves.labels();
    assert_eq!(
        &labels[..5],
        &["Impulse 1", "Impulse 2", "Impulse 3", "Impulse 4", "Impulse 5"]
    );
    assert!(labels[5..].iter().all(|l| *l == "Impulse Ext"));

    assert_eq!(analysis.interpretation.corrective_count, 0);
    assert_eq!(
        analysis.interpretation.recommendation,
        Recommendation::StrongBuy
    );
}

#[test]
fn test_two_points_yield_one_row_and_no_waves() {
    let analysis = analyze("tinycoin", &daily_points(&[10.0, 30.0])).unwrap();

    assert_eq!(analysis.rows.len(), 1);
    let row = &analysis.rows[0];
    assert_eq!(row.candle.open, 10.0);
    assert_eq!(row.candle.close, 30.0);
    assert_eq!(row.rsi, None);
    assert!(analysis.waves.is_empty());
}

#[test]
fn test_single_point_is_insufficient() {
    let err = analyze("lonelycoin", &daily_points(&[10.0])).unwrap_err();
    assert!(matches!(err, WavecountError::InsufficientData { points: 1 }));
}

#[test]
fn test_rerun_is_identical() {
    let closes = [
        100.0, 104.0, 97.0, 99.0, 110.0, 121.0, 118.0, 90.0, 95.0, 96.0, 101.0, 88.0, 87.0, 92.0,
        100.0, 103.0, 99.0,
    ];
    let points = daily_points(&closes);
    let first = analyze("repeat", &points).unwrap();
    let second = analyze("repeat", &points).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rsi_appears_after_fourteen_rows_and_stays_bounded() {
    let closes: Vec<f64> = (0..40)
        .map(|i| 100.0 + 10.0 * ((i as f64) * 0.7).sin())
        .collect();
    let analysis = analyze("wavy", &daily_points(&closes)).unwrap();

    assert_eq!(analysis.rows.len(), 39);
    assert!(analysis.rows[..14].iter().all(|r| r.rsi.is_none()));
    for row in &analysis.rows[14..] {
        let rsi = row.rsi.expect("rsi defined after warm-up");
        assert!((0.0..=100.0).contains(&rsi));
    }
}

#[test]
fn test_explanation_names_the_asset_and_price() {
    let analysis = analyze("dogecoin", &daily_points(&[0.08, 0.09, 0.0812])).unwrap();
    let text = analysis.explain();
    assert!(text.contains("Elliot Wave Analysis for Dogecoin:"));
    assert!(text.contains("Current Price: $0.08"));
}
