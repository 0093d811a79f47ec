//! # pipgym Portfolio
//!
//! Account state, lot sizing and position bookkeeping for the pipgym
//! trading simulator.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Portfolio**: Account, sizer and ledger behind one interface
//! - **Ledger**: The single open-position slot and the closed-trade history
//! - **Account**: Realized balance, high-water mark and drawdown
//! - **`LotSizer`**: Balance-proportional position sizing
//!
//! ## Key Rules
//!
//! - **One position**: Opening while a position exists is a no-op
//! - **Spread on entry**: Longs enter at price + spread, shorts at price - spread
//! - **Win/loss split**: `pnl > 0` is a win, everything else a loss

#![deny(clippy::all)]

//! ## Example
//!
//! ```rust
//! use pipgym_portfolio::{Portfolio, CloseOutcome};
//! use pipgym_types::{Direction, ExitReason};
//!
//! let mut portfolio = Portfolio::default();
//!
//! portfolio.begin_step();
//! portfolio.open(Direction::Long, 1.1000, 0.0002, 0, 0, 0.0010);
//!
//! portfolio.begin_step();
//! let unrealized = portfolio.mark(1.1050);
//! assert!(unrealized > 0.0);
//!
//! let outcome = portfolio.close(1.1050, 1, 0, ExitReason::Agent);
//! assert!(matches!(outcome, CloseOutcome::Closed { .. }));
//! assert!(portfolio.balance() > 10_000.0);
//! ```

pub mod account;
pub mod error;
pub mod ledger;
pub mod portfolio;
pub mod sizing;

// Re-exports for convenience
pub use account::Account;
pub use error::PortfolioError;
pub use ledger::{
    CloseOutcome, FULL_WEIGHT_HOLD_BARS, Ledger, NOTHING_TO_CLOSE_PENALTY, OpenOutcome,
    close_signal,
};
pub use portfolio::Portfolio;
pub use sizing::LotSizer;
