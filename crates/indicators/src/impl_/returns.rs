//! Clipped close-over-close returns

use crate::traits::Indicator;
use pipgym_types::Bar;

/// Percent change of close over the previous close, clipped to
/// `[-clip, clip]`. The first value is 0.
#[derive(Debug, Clone)]
pub struct Returns {
    /// Symmetric clip bound
    pub clip: f64,
}

impl Returns {
    /// Creates a returns indicator with the given clip bound.
    #[must_use]
    pub fn new(clip: f64) -> Self {
        Self { clip }
    }
}

impl Indicator for Returns {
    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        bars.iter()
            .enumerate()
            .map(|(i, bar)| {
                if i == 0 {
                    return 0.0;
                }
                let prev = bars[i - 1].close;
                ((bar.close - prev) / prev).clamp(-self.clip, self.clip)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "RETURNS"
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

    #[test]
    fn test_returns_clip_and_first_zero() {
        let bars: Vec<Bar> = [100.0, 101.0, 150.0, 75.0].into_iter().map(make_bar).collect();
        let result = Returns::new(0.1).compute(&bars);

        assert_relative_eq!(result[0], 0.0);
        assert_relative_eq!(result[1], 0.01, epsilon = 1e-12);
        assert_relative_eq!(result[2], 0.1);
        assert_relative_eq!(result[3], -0.1);
    }
}
