//! Indicator implementations
//!
//! Contains the concrete feature indicators and shared rolling helpers.

pub mod atr;
pub mod atr_norm;
pub mod bollinger;
pub mod candle_pattern;
pub mod returns;
pub mod rolling;
pub mod rsi;
pub mod trend_strength;
