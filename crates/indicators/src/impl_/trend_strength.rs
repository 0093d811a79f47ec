//! ADX-style trend strength mapped to [-1, 1]

use crate::impl_::atr::ATR;
use crate::impl_::rolling::rolling_mean_partial;
use crate::traits::Indicator;
use pipgym_types::Bar;

const DIVISOR_FLOOR: f64 = 1e-8;

/// Trend strength derived from directional movement.
///
/// +DM/-DM are smoothed with a partial-window mean, divided by ATR to get
/// +DI/-DI, combined into DX, and averaged again into ADX. The output is
/// `clip(ADX / 25 - 1, -1, 1)`; rows with no defined DX map to -1.
#[derive(Debug, Clone)]
pub struct TrendStrength {
    /// Smoothing and ATR period
    pub period: usize,
}

impl TrendStrength {
    /// Creates a new trend strength indicator.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Computes trend strength using a precomputed ATR series.
    #[must_use]
    pub fn from_atr(&self, atr: &[f64], bars: &[Bar]) -> Vec<f64> {
        let (pdm, ndm): (Vec<f64>, Vec<f64>) = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                if i == 0 {
                    return (0.0, 0.0);
                }
                let prev = &bars[i - 1];
                ((bar.high - prev.high).max(0.0), (prev.low - bar.low).max(0.0))
            })
            .unzip();

        let pdm_smooth = rolling_mean_partial(&pdm, self.period);
        let ndm_smooth = rolling_mean_partial(&ndm, self.period);

        let dx: Vec<f64> = atr
            .iter()
            .zip(pdm_smooth.iter().zip(&ndm_smooth))
            .map(|(&a, (&p, &n))| {
                // NaN ATR stays NaN through the floor
                let atr_safe = if a < DIVISOR_FLOOR { DIVISOR_FLOOR } else { a };
                let pdi = p / atr_safe * 100.0;
                let ndi = n / atr_safe * 100.0;
                let sum = pdi + ndi;
                let sum_safe = if sum < DIVISOR_FLOOR { DIVISOR_FLOOR } else { sum };
                (pdi - ndi).abs() / sum_safe * 100.0
            })
            .collect();

        rolling_mean_partial(&dx, self.period)
            .into_iter()
            .map(|adx| {
                let adx = if adx.is_nan() { 0.0 } else { adx };
                (adx / 25.0 - 1.0).clamp(-1.0, 1.0)
            })
            .collect()
    }
}

impl Indicator for TrendStrength {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let atr = ATR::new(self.period).compute(bars);
        self.from_atr(&atr, bars)
    }

    fn name(&self) -> &str {
        "TREND_STRENGTH"
    }

    fn warmup_periods(&self) -> usize {
        0
    }
}
