//! ATR-over-close normalized to [-1, 1] across the whole series

use crate::impl_::atr::ATR;
use crate::traits::Indicator;
use pipgym_types::Bar;

/// Relative volatility `atr / close`, min-max scaled to [-1, 1].
///
/// Min and max are taken over every defined value of the series, so each
/// row depends on the full input. This is a series-level normalization,
/// not a causal rolling one.
#[derive(Debug, Clone)]
pub struct AtrNorm {
    /// ATR period
    pub period: usize,
}

impl AtrNorm {
    /// Creates a new normalized ATR indicator.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Scales precomputed ATR values against the bars' closes.
    #[must_use]
    pub fn from_atr(atr: &[f64], bars: &[Bar]) -> Vec<f64> {
        let ratio: Vec<f64> = atr
            .iter()
            .zip(bars)
            .map(|(a, bar)| a / bar.close)
            .collect();

        let (min, max) = ratio
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() {
            return vec![f64::NAN; ratio.len()];
        }

        ratio
            .iter()
            .map(|r| 2.0 * (r - min) / (max - min + 1e-8) - 1.0)
            .collect()
    }
}

impl Indicator for AtrNorm {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let atr = ATR::new(self.period).compute(bars);
        Self::from_atr(&atr, bars)
    }

    fn name(&self) -> &str {
        "ATR_NORM"
    }

    fn warmup_periods(&self) -> usize {
        self.period.saturating_sub(1)
    }
}
