//! Single-bar price action signal

use crate::traits::Indicator;
use pipgym_types::Bar;

const EPS: f64 = 1e-8;

/// Combines body-to-range and wick imbalance of each bar into [-1, 1].
///
/// `((close - open) / range + (upper_wick - lower_wick) / (upper_wick + lower_wick)) / 2`
#[derive(Debug, Clone, Default)]
pub struct CandlePattern;

impl CandlePattern {
    /// Signal for a single bar.
    #[must_use]
    pub fn value(bar: &Bar) -> f64 {
        let range = bar.range() + EPS;
        let upper = bar.upper_wick();
        let lower = bar.lower_wick();
        let signal = (bar.body() / range + (upper - lower) / (upper + lower + EPS)) / 2.0;
        signal.clamp(-1.0, 1.0)
    }
}

impl Indicator for CandlePattern {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        bars.iter().map(Self::value).collect()
    }

    fn name(&self) -> &str {
        "CANDLE_PATTERN"
    }

    fn warmup_periods(&self) -> usize {
        0
    }
}
