//! Indicator trait.

use pipgym_types::Bar;

/// Trait for single-output indicators.
///
/// All indicators compute over the full bar series and return a `Vec<f64>`
/// of the same length. Undefined values are NaN.
pub trait Indicator: Send + Sync {
    /// Computes the indicator for all bars.
    ///
    /// Returns `Vec<f64>` with the same length as `bars`.
    /// Values at indices < `warmup_periods()` are `f64::NAN`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;

    /// Name of the indicator (e.g., "RSI", "ATR").
    fn name(&self) -> &str;

    /// Number of leading rows that are undefined.
    fn warmup_periods(&self) -> usize;
}
