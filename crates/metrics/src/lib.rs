//! pipgym Metrics
//!
//! Computes the read-only episode report and the trade-quality score.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Report computation entrypoints.
pub mod compute;
/// Report structures and text rendering.
pub mod output;
/// Composite trade-quality score.
pub mod quality;
/// Trade-based metric helpers.
pub mod trade_metrics;

pub use compute::{EpisodeSnapshot, compute_report, summarize_trades};
pub use output::{
    DirectionalStats, EpisodeReport, HoldTimeBreakdown, OpenPositionReport, TradeSummary,
};
pub use quality::trade_quality;
