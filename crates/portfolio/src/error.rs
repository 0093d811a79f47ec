//! Error types for the portfolio crate.

use thiserror::Error;

/// Errors reported by portfolio consistency checks.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Non-finite portfolio value
    #[error("portfolio value is not finite: {field}={value}")]
    NonFiniteValue {
        /// Name of the field
        field: String,
        /// Non-finite value encountered
        value: f64,
    },

    /// Balance does not equal the initial balance plus realized `PnL`
    #[error(
        "portfolio consistency violation: balance {balance}, expected {expected} (diff {diff}, tolerance {tolerance})"
    )]
    ConsistencyViolation {
        /// Recorded balance
        balance: f64,
        /// Initial balance plus the sum of trade `PnL`
        expected: f64,
        /// Absolute difference between balance and expected value
        diff: f64,
        /// Allowed tolerance
        tolerance: f64,
    },

    /// Win and loss counters disagree with the trade history
    #[error("trade count mismatch: {wins} wins + {losses} losses != {trades} trades")]
    CountMismatch {
        /// Winning trades counted
        wins: usize,
        /// Losing trades counted
        losses: usize,
        /// Recorded trades
        trades: usize,
    },
}
