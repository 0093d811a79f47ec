//! pipgym Types
//!
//! Core data structures for the pipgym trading simulator.
//! This crate provides types for bars, actions, positions, trades,
//! aligned feature/price series, and configuration.

#![deny(clippy::all)]

pub mod action;
pub mod bar;
pub mod config;
pub mod error;
pub mod position;
pub mod series;
pub mod trade;

// Re-export main types for convenience
pub use action::{Action, Direction};
pub use bar::{Bar, DEFAULT_VOLUME};
pub use config::{AccountConfig, EnvConfig, FeatureConfig, InstrumentConfig};
pub use error::CoreError;
pub use position::Position;
pub use series::{
    FEATURE_COUNT, FEATURE_NAMES, FeatureVector, MarketData, OBSERVATION_SIZE, Observation,
    PriceSeries,
};
pub use trade::{ExitReason, Trade, TradeMetrics};
