use approx::assert_relative_eq;
use proptest::prelude::*;

use pipgym_indicators::{ATR, FeaturePipeline, Indicator, IndicatorError};
use pipgym_types::{FeatureConfig, MarketData};

mod common;
use common::{random_walk_bars, wave_bars};

fn build(n: usize) -> MarketData {
    FeaturePipeline::default().build(&wave_bars(n)).unwrap()
}

#[test]
fn test_price_arrays_share_feature_length() {
    let data = build(250);
    let prices = data.prices();
    assert_eq!(data.features().len(), 230);
    assert_eq!(prices.close().len(), data.len());
    assert_eq!(prices.high().len(), data.len());
    assert_eq!(prices.low().len(), data.len());
    assert_eq!(prices.spread().len(), data.len());
    assert_eq!(prices.atr().len(), data.len());
    assert_eq!(prices.timestamps().len(), data.len());
}

#[test]
fn test_atr_column_matches_standalone_atr() {
    let bars = wave_bars(150);
    let data = FeaturePipeline::default().build(&bars).unwrap();
    let atr = ATR::new(14).compute(&bars);

    for (row, value) in data.prices().atr().iter().enumerate() {
        assert_relative_eq!(*value, atr[row + 20]);
    }
}

#[test]
fn test_insufficient_data_reports_counts() {
    let err = FeaturePipeline::default().build(&wave_bars(50)).unwrap_err();
    match err {
        IndicatorError::InsufficientData {
            required,
            available,
        } => {
            assert_eq!(required, 100);
            assert_eq!(available, 30);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_custom_min_rows() {
    let config = FeatureConfig {
        min_rows: 10,
        ..FeatureConfig::default()
    };
    let data = FeaturePipeline::new(config).build(&wave_bars(40)).unwrap();
    assert_eq!(data.len(), 20);
}

#[test]
fn test_interior_nan_rows_are_dropped_after_lookback() {
    let mut bars = wave_bars(200);
    bars[80].close = f64::NAN;

    let data = FeaturePipeline::default().build(&bars).unwrap();

    // Lookback removes 20 rows; the NaN close leaves returns undefined at
    // rows 80 and 81.
    assert_eq!(data.len(), 178);

    let timestamps = data.prices().timestamps();
    assert!(!timestamps.contains(&bars[80].timestamp_ns));
    assert!(!timestamps.contains(&bars[81].timestamp_ns));
    assert!(timestamps.contains(&bars[79].timestamp_ns));
    assert!(timestamps.contains(&bars[82].timestamp_ns));

    let prices = data.prices();
    for column in [prices.close(), prices.high(), prices.low(), prices.spread(), prices.atr()] {
        assert_eq!(column.len(), data.len());
    }
    for (row, &ts) in timestamps.iter().enumerate() {
        let source = bars.iter().find(|b| b.timestamp_ns == ts).unwrap();
        assert_relative_eq!(prices.close()[row], source.close);
        assert_relative_eq!(prices.high()[row], source.high);
        assert_relative_eq!(prices.low()[row], source.low);
        assert_relative_eq!(prices.spread()[row], source.spread);
        assert!(data.features()[row].iter().all(|v| v.is_finite()));
        assert!(prices.atr()[row].is_finite());
    }
}

#[test]
fn test_rows_depend_only_on_past_except_atr_norm() {
    // Appending bars must not change the rolling features of earlier rows.
    let short = build(150);
    let long = build(200);
    for row in 0..short.len() {
        let a = short.features()[row];
        let b = long.features()[row];
        for f in [0, 1, 3, 4, 5] {
            assert_relative_eq!(a[f], b[f], epsilon = 1e-12);
        }
    }
}

proptest! {
    #[test]
    fn prop_features_bounded(bars in random_walk_bars(160)) {
        let data = FeaturePipeline::default().build(&bars).unwrap();
        for row in data.features() {
            prop_assert!((-0.1..=0.1).contains(&row[0]));
            for f in [1, 2, 4, 5] {
                prop_assert!(row[f] >= -1.0 - 1e-9 && row[f] <= 1.0 + 1e-9, "feature {} = {}", f, row[f]);
            }
            prop_assert!((0.0..=1.0).contains(&row[3]));
        }
    }
}
