#![allow(dead_code)]

use pipgym_types::{Bar, EnvConfig, FEATURE_COUNT, FeatureVector, MarketData, PriceSeries};
use proptest::prelude::*;

pub const HOUR_NS: i64 = 3_600_000_000_000;

/// Deterministic oscillating bar series.
pub fn wave_bars(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let close = 1.10 + 0.01 * (t * 0.3).sin() + 0.0001 * t;
            let open = close - 0.002 * (t * 0.7).cos();
            Bar {
                timestamp_ns: i as i64 * HOUR_NS,
                open,
                high: open.max(close) + 0.001,
                low: open.min(close) - 0.001,
                close,
                spread: 10.0,
                volume: 1.0,
            }
        })
        .collect()
}

/// Random-walk bar series with consistent OHLC.
pub fn random_walk_bars(len: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((-0.01f64..0.01, 0.0f64..0.005, 0.0f64..0.005, 0.0f64..30.0), len)
        .prop_map(|steps| {
            let mut close = 1.0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (ret, up, down, spread))| {
                    let open = close;
                    close = (close * (1.0 + ret)).max(0.01);
                    Bar {
                        timestamp_ns: i as i64 * HOUR_NS,
                        open,
                        high: open.max(close) + up,
                        low: (open.min(close) - down).max(0.001),
                        close,
                        spread,
                        volume: 1.0,
                    }
                })
                .collect()
        })
}

/// Hand-built matrix with the given closes and spreads (in points);
/// feature row `i` is filled with `i / 100`.
pub fn market_data(closes: &[f64], spreads: &[f64]) -> MarketData {
    assert_eq!(closes.len(), spreads.len());
    let len = closes.len();
    let prices = PriceSeries::new(
        (0..len as i64).map(|i| i * HOUR_NS).collect(),
        closes.to_vec(),
        closes.to_vec(),
        closes.to_vec(),
        spreads.to_vec(),
        vec![0.001; len],
    )
    .unwrap();
    let features: Vec<FeatureVector> = (0..len).map(|i| [i as f64 / 100.0; FEATURE_COUNT]).collect();
    MarketData::new(features, prices).unwrap()
}

/// Config with one lot per `balance_per_lot` and a fixed seed.
pub fn config(balance_per_lot: f64) -> EnvConfig {
    let mut config = EnvConfig {
        rng_seed: Some(42),
        ..EnvConfig::default()
    };
    config.account.balance_per_lot = balance_per_lot;
    config
}
