//! One-time feature build: bars in, aligned [`MarketData`] out.

use crate::error::IndicatorError;
use crate::impl_::atr::ATR;
use crate::impl_::atr_norm::AtrNorm;
use crate::impl_::bollinger::VolatilityBreakout;
use crate::impl_::candle_pattern::CandlePattern;
use crate::impl_::returns::Returns;
use crate::impl_::rsi::RSI;
use crate::impl_::trend_strength::TrendStrength;
use crate::traits::Indicator;
use pipgym_types::{
    Bar, FEATURE_COUNT, FEATURE_NAMES, FeatureConfig, FeatureVector, MarketData, PriceSeries,
};

/// Untrimmed per-bar feature columns, in observation order, plus ATR.
#[derive(Debug, Clone)]
pub struct FeatureColumns {
    /// One column per feature, each as long as the input bars
    pub features: [Vec<f64>; FEATURE_COUNT],
    /// Volatility series used for position bookkeeping
    pub atr: Vec<f64>,
}

impl FeatureColumns {
    /// `true` when row `idx` has every feature and ATR defined.
    #[must_use]
    pub fn is_row_defined(&self, idx: usize) -> bool {
        self.atr.get(idx).is_some_and(|v| v.is_finite())
            && self
                .features
                .iter()
                .all(|col| col.get(idx).is_some_and(|v| v.is_finite()))
    }

    /// Feature row at `idx` (values may be NaN).
    #[must_use]
    pub fn row(&self, idx: usize) -> FeatureVector {
        std::array::from_fn(|f| self.features[f].get(idx).copied().unwrap_or(f64::NAN))
    }
}

/// Builds the bounded feature matrix and its aligned price series.
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    config: FeatureConfig,
}

impl FeaturePipeline {
    /// Creates a pipeline with the given parameters.
    #[must_use]
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Pipeline parameters.
    #[must_use]
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Feature indicators in observation order.
    #[must_use]
    pub fn indicators(&self) -> [Box<dyn Indicator>; FEATURE_COUNT] {
        let c = &self.config;
        [
            Box::new(Returns::new(c.returns_clip)),
            Box::new(RSI::new(c.rsi_period)),
            Box::new(AtrNorm::new(c.atr_period)),
            Box::new(VolatilityBreakout::new(c.bollinger_period, c.bollinger_std)),
            Box::new(TrendStrength::new(c.atr_period)),
            Box::new(CandlePattern),
        ]
    }

    /// Computes every feature column over the full series, before trimming.
    ///
    /// # Errors
    /// [`IndicatorError::InvalidParams`] on zero periods or non-positive factors.
    pub fn compute_columns(&self, bars: &[Bar]) -> Result<FeatureColumns, IndicatorError> {
        self.validate()?;

        let features = self.indicators().map(|indicator| {
            let column = indicator.compute(bars);
            tracing::debug!(
                "Computed {} ({} undefined leading rows)",
                indicator.name(),
                indicator.warmup_periods()
            );
            column
        });

        Ok(FeatureColumns {
            features,
            atr: ATR::new(self.config.atr_period).compute(bars),
        })
    }

    /// Runs the full build: compute, drop the lookback rows, drop rows with
    /// any undefined value, and re-slice the price arrays to the survivors.
    ///
    /// # Errors
    /// - [`IndicatorError::InvalidParams`] on bad parameters.
    /// - [`IndicatorError::InsufficientData`] when fewer than `min_rows`
    ///   rows survive trimming.
    pub fn build(&self, bars: &[Bar]) -> Result<MarketData, IndicatorError> {
        let columns = self.compute_columns(bars)?;
        let lookback = self.config.lookback();

        let kept: Vec<usize> = (lookback..bars.len())
            .filter(|&i| columns.is_row_defined(i))
            .collect();

        if kept.len() < self.config.min_rows {
            return Err(IndicatorError::InsufficientData {
                required: self.config.min_rows,
                available: kept.len(),
            });
        }

        let features: Vec<FeatureVector> = kept.iter().map(|&i| columns.row(i)).collect();
        let pick = |f: fn(&Bar) -> f64| -> Vec<f64> { kept.iter().map(|&i| f(&bars[i])).collect() };

        let prices = PriceSeries::new(
            kept.iter().map(|&i| bars[i].timestamp_ns).collect(),
            pick(|b| b.close),
            pick(|b| b.high),
            pick(|b| b.low),
            pick(|b| b.spread),
            kept.iter().map(|&i| columns.atr[i]).collect(),
        )?;

        tracing::info!(
            "Feature pipeline: {} bars in, {} rows out (lookback {}, features {:?})",
            bars.len(),
            kept.len(),
            lookback,
            FEATURE_NAMES
        );

        Ok(MarketData::new(features, prices)?)
    }

    fn validate(&self) -> Result<(), IndicatorError> {
        let c = &self.config;
        if c.atr_period == 0 || c.rsi_period == 0 || c.bollinger_period == 0 {
            return Err(IndicatorError::invalid_params("periods must be > 0"));
        }
        if c.bollinger_std.is_nan() || c.bollinger_std <= 0.0 {
            return Err(IndicatorError::invalid_params("bollinger_std must be > 0"));
        }
        if c.returns_clip.is_nan() || c.returns_clip <= 0.0 {
            return Err(IndicatorError::invalid_params("returns_clip must be > 0"));
        }
        Ok(())
    }
}
