//! Bollinger Bands and the volatility breakout feature

use crate::impl_::rolling::{rolling_mean_partial, rolling_std_partial};
use crate::traits::Indicator;
use pipgym_types::Bar;

const BAND_WIDTH_FLOOR: f64 = 1e-8;

/// Bollinger Bands result containing upper, middle, and lower bands.
#[derive(Debug, Clone)]
pub struct BollingerResult {
    /// Upper band = mean + std_factor * std
    pub upper: Vec<f64>,
    /// Middle band = rolling mean
    pub middle: Vec<f64>,
    /// Lower band = mean - std_factor * std
    pub lower: Vec<f64>,
}

/// Bollinger Bands
///
/// Partial windows are accepted (a band exists from the first bar). Uses
/// the sample standard deviation (n-1); where it is undefined (a single
/// observation) the std is taken as 0.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Period for the mean and standard deviation
    pub period: usize,
    /// Multiplier for standard deviation (typically 2.0)
    pub std_factor: f64,
}

impl BollingerBands {
    /// Creates new Bollinger Bands with the given parameters.
    #[must_use]
    pub fn new(period: usize, std_factor: f64) -> Self {
        Self { period, std_factor }
    }

    /// Computes all three bands over close prices.
    #[must_use]
    pub fn compute_all(&self, bars: &[Bar]) -> BollingerResult {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let middle = rolling_mean_partial(&closes, self.period);
        let std: Vec<f64> = rolling_std_partial(&closes, self.period)
            .into_iter()
            .map(|s| if s.is_nan() { 0.0 } else { s })
            .collect();

        let upper = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m + self.std_factor * s)
            .collect();
        let lower = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m - self.std_factor * s)
            .collect();

        BollingerResult {
            upper,
            middle,
            lower,
        }
    }
}

/// Position of close within the Bollinger band, clipped to [0, 1].
///
/// 0 at or below the lower band, 1 at or above the upper band.
#[derive(Debug, Clone)]
pub struct VolatilityBreakout {
    /// Underlying bands
    pub bands: BollingerBands,
}

impl VolatilityBreakout {
    /// Creates the breakout feature over the given band parameters.
    #[must_use]
    pub fn new(period: usize, std_factor: f64) -> Self {
        Self {
            bands: BollingerBands::new(period, std_factor),
        }
    }
}

impl Indicator for VolatilityBreakout {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let bands = self.bands.compute_all(bars);

        bars.iter()
            .zip(bands.upper.iter().zip(&bands.lower))
            .map(|(bar, (upper, lower))| {
                let width = (upper - lower).max(BAND_WIDTH_FLOOR);
                ((bar.close - lower) / width).clamp(0.0, 1.0)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "VOLATILITY_BREAKOUT"
    }

    fn warmup_periods(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_bar(close: f64) -> Bar {
        Bar {
            timestamp_ns: 0,
            open: close,
            high: close,
            low: close,
            close,
            spread: 0.0,
            volume: 1.0,
        }
    }

    fn bars_from(closes: &[f64]) -> Vec<Bar> {
        closes.iter().copied().map(make_bar).collect()
    }

    #[test]
    fn test_bollinger_basic() {
        let bars = bars_from(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let result = BollingerBands::new(3, 2.0).compute_all(&bars);

        // Single observation: std undefined -> 0, bands collapse
        assert_relative_eq!(result.middle[0], 1.0);
        assert_relative_eq!(result.upper[0], 1.0);

        // Window [1, 2, 3]: mean 2, sample std 1
        assert_relative_eq!(result.middle[2], 2.0);
        assert_relative_eq!(result.upper[2], 4.0);
        assert_relative_eq!(result.lower[2], 0.0);
    }

    #[test]
    fn test_bollinger_symmetry() {
        let bars = bars_from(&[1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 2.0]);
        let result = BollingerBands::new(3, 2.0).compute_all(&bars);

        for i in 0..bars.len() {
            let mid = result.middle[i];
            assert_relative_eq!(result.upper[i] - mid, mid - result.lower[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_breakout_position_in_band() {
        // Window [1, 2, 3] -> lower 0, upper 4, close 3 -> 0.75
        let bars = bars_from(&[1.0, 2.0, 3.0]);
        let result = VolatilityBreakout::new(3, 2.0).compute(&bars);
        assert_relative_eq!(result[2], 0.75);
    }

    #[test]
    fn test_breakout_flat_prices() {
        // Zero-width band: width floored, close - lower == 0 -> 0
        let bars = bars_from(&[5.0; 8]);
        let result = VolatilityBreakout::new(3, 2.0).compute(&bars);
        for v in result {
            assert_relative_eq!(v, 0.0);
        }
    }
}
