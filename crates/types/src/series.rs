//! Aligned feature and price series produced by the one-time build phase.
//!
//! Both containers are immutable once built; the simulator only moves a
//! cursor across them.

use crate::error::CoreError;

/// Number of market features per bar.
pub const FEATURE_COUNT: usize = 6;

/// Observation width: market features plus the normalized unrealized `PnL`.
pub const OBSERVATION_SIZE: usize = FEATURE_COUNT + 1;

/// Feature names in observation order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "returns",
    "rsi_norm",
    "atr_norm",
    "volatility_breakout",
    "trend_strength",
    "candle_pattern",
];

/// One row of market features.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Observation handed to the policy:
/// `[returns, rsi_norm, atr_norm, volatility_breakout, trend_strength, candle_pattern, unrealized_pnl_norm]`.
pub type Observation = [f64; OBSERVATION_SIZE];

/// Post-alignment price arrays, indexed identically to the feature matrix.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PriceSeries {
    timestamps: Vec<i64>,
    close: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    spread: Vec<f64>,
    atr: Vec<f64>,
}

impl PriceSeries {
    /// Creates a price series, rejecting arrays of unequal length.
    ///
    /// # Errors
    /// Returns [`CoreError::Data`] when the arrays are not aligned.
    pub fn new(
        timestamps: Vec<i64>,
        close: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        spread: Vec<f64>,
        atr: Vec<f64>,
    ) -> Result<Self, CoreError> {
        let len = close.len();
        let lengths = [
            timestamps.len(),
            high.len(),
            low.len(),
            spread.len(),
            atr.len(),
        ];
        if lengths.iter().any(|&l| l != len) {
            return Err(CoreError::Data(format!(
                "price arrays misaligned: close={len}, timestamps/high/low/spread/atr={lengths:?}"
            )));
        }

        Ok(Self {
            timestamps,
            close,
            high,
            low,
            spread,
            atr,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// `true` when the series has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Bar timestamps (open time, epoch-ns).
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Close prices.
    #[must_use]
    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// High prices.
    #[must_use]
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Low prices.
    #[must_use]
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Raw spread in points.
    #[must_use]
    pub fn spread(&self) -> &[f64] {
        &self.spread
    }

    /// Volatility series (14-period SMA of true range by default).
    #[must_use]
    pub fn atr(&self) -> &[f64] {
        &self.atr
    }
}

/// Feature matrix aligned with a [`PriceSeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct MarketData {
    features: Vec<FeatureVector>,
    prices: PriceSeries,
}

impl MarketData {
    /// Pairs a feature matrix with its price series.
    ///
    /// # Errors
    /// Returns [`CoreError::Data`] when row counts differ.
    pub fn new(features: Vec<FeatureVector>, prices: PriceSeries) -> Result<Self, CoreError> {
        if features.len() != prices.len() {
            return Err(CoreError::Data(format!(
                "feature rows ({}) do not match price rows ({})",
                features.len(),
                prices.len()
            )));
        }
        Ok(Self { features, prices })
    }

    /// Number of usable rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// `true` when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature rows.
    #[must_use]
    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    /// Feature row at `idx`.
    #[must_use]
    pub fn feature(&self, idx: usize) -> Option<&FeatureVector> {
        self.features.get(idx)
    }

    /// Aligned price series.
    #[must_use]
    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }
}
