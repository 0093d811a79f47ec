//! pipgym Indicators
//!
//! Feature pipeline for the pipgym trading simulator.
//! Turns a bar series into a bounded six-feature matrix plus the aligned
//! price series used by the simulator.
//!
//! # Features
//! - Indicator trait with vectorized computation
//! - One-time build with warm-up trimming
//!
//! # Available Indicators
//! - Returns: clipped close-over-close change
//! - RSI: simple-average RSI normalized to [-1, 1]
//! - ATR: simple moving average of true range
//! - ATR-Norm: series-wide min-max scaled ATR/close
//! - Volatility Breakout: position of close within Bollinger Bands
//! - Trend Strength: ADX-style directional strength
//! - Candle Pattern: body and wick imbalance of a single bar

#![deny(clippy::all)]

pub mod error;
pub mod impl_;
pub mod pipeline;
pub mod traits;

// Re-export main types
pub use error::IndicatorError;
pub use pipeline::{FeatureColumns, FeaturePipeline};
pub use traits::Indicator;

// Re-export indicator implementations
pub use impl_::{
    atr::ATR,
    atr_norm::AtrNorm,
    bollinger::{BollingerBands, BollingerResult, VolatilityBreakout},
    candle_pattern::CandlePattern,
    returns::Returns,
    rsi::RSI,
    trend_strength::TrendStrength,
};
