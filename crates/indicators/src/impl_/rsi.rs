//! Relative Strength Index (RSI), simple-average variant

use crate::impl_::rolling::rolling_mean;
use crate::traits::Indicator;
use pipgym_types::Bar;

/// Relative Strength Index normalized to [-1, 1] (`rsi / 50 - 1`).
///
/// Gains and losses are averaged with a simple moving average over
/// `period` close-to-close deltas; the first delta is 0. When the average
/// loss is exactly zero, RS is taken as 0.
#[derive(Debug, Clone)]
pub struct RSI {
    /// Number of periods for the gain/loss averages
    pub period: usize,
}

impl RSI {
    /// Creates a new RSI indicator with the given period.
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Raw RSI in [0, 100].
    #[must_use]
    pub fn compute_raw(&self, bars: &[Bar]) -> Vec<f64> {
        let deltas: Vec<f64> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| if i == 0 { 0.0 } else { bar.close - bars[i - 1].close })
            .collect();

        let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
        let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

        let avg_gain = rolling_mean(&gains, self.period);
        let avg_loss = rolling_mean(&losses, self.period);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&gain, &loss)| {
                let rs = if loss == 0.0 { 0.0 } else { gain / loss };
                100.0 - 100.0 / (1.0 + rs)
            })
            .collect()
    }
}

impl Indicator for RSI {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.compute_raw(bars)
            .into_iter()
            .map(|rsi| rsi / 50.0 - 1.0)
            .collect()
    }

    fn name(&self) -> &str {
        "RSI"
    }

    fn warmup_periods(&self) -> usize {
        self.period.saturating_sub(1)
    }
}
