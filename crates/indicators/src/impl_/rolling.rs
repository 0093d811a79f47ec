//! Rolling-window helpers shared by the feature indicators.
//!
//! Two window policies are used:
//! - strict: output is NaN until the window is full, and NaN whenever the
//!   window contains a NaN;
//! - partial: output is defined once at least one finite value is in the
//!   window; NaN inputs are skipped.

/// Simple moving average over a full window (strict policy).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];

    if period == 0 || len < period {
        return result;
    }

    for i in (period - 1)..len {
        let window = &values[i + 1 - period..=i];
        if window.iter().all(|v| v.is_finite()) {
            result[i] = window.iter().sum::<f64>() / period as f64;
        }
    }

    result
}

/// Moving average over up to `period` trailing values, skipping NaN (partial policy).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_mean_partial(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];

    if period == 0 {
        return result;
    }

    for i in 0..len {
        let start = (i + 1).saturating_sub(period);
        let (sum, count) = values[start..=i]
            .iter()
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if count > 0 {
            result[i] = sum / count as f64;
        }
    }

    result
}

/// Sample standard deviation (ddof = 1) over up to `period` trailing values,
/// skipping NaN. Undefined (NaN) with fewer than two observations.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rolling_std_partial(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];

    if period == 0 {
        return result;
    }

    for i in 0..len {
        let start = (i + 1).saturating_sub(period);
        let window: Vec<f64> = values[start..=i]
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if window.len() < 2 {
            continue;
        }
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        result[i] = variance.sqrt();
    }

    result
}
