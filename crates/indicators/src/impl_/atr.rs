//! Average True Range (ATR) indicator, simple-average variant

use crate::impl_::rolling::rolling_mean;
use crate::traits::Indicator;
use pipgym_types::Bar;

/// Average True Range
///
/// Simple moving average of the true range. The first TR has no previous
/// close and is just High - Low. Values before `period - 1` are NaN.
#[derive(Debug, Clone)]
pub struct ATR {
    /// Number of periods for ATR calculation
    pub period: usize,
}

impl ATR {
    /// Creates a new ATR indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// True Range for a bar given the previous close.
    ///
    /// TR = max(High - Low, |High - Prev_Close|, |Low - Prev_Close|)
    #[inline]
    #[must_use]
    pub fn true_range(bar: &Bar, prev_close: f64) -> f64 {
        let hl = bar.high - bar.low;
        let hc = (bar.high - prev_close).abs();
        let lc = (bar.low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    /// True Range series for all bars.
    #[must_use]
    pub fn true_range_series(bars: &[Bar]) -> Vec<f64> {
        bars.iter()
            .enumerate()
            .map(|(i, bar)| {
                if i == 0 {
                    bar.range()
                } else {
                    Self::true_range(bar, bars[i - 1].close)
                }
            })
            .collect()
    }
}

impl Indicator for ATR {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        rolling_mean(&Self::true_range_series(bars), self.period)
    }

    fn name(&self) -> &str {
        "ATR"
    }

    fn warmup_periods(&self) -> usize {
        self.period.saturating_sub(1)
    }
}
