//! Portfolio state for one simulated episode.
//!
//! The Portfolio struct combines the account, the lot sizer, and the
//! single-position ledger into a unified interface.

use crate::account::Account;
use crate::error::PortfolioError;
use crate::ledger::{CloseOutcome, Ledger, OpenOutcome};
use crate::sizing::LotSizer;
use pipgym_types::{
    AccountConfig, Direction, ExitReason, InstrumentConfig, Position, Trade, TradeMetrics,
};

const CONSISTENCY_EPS: f64 = 1e-8;

/// Account, sizing and position bookkeeping.
///
/// Manages:
/// - Realized balance and drawdown
/// - The open position (at most one)
/// - Closed trades and running statistics
#[derive(Debug, Clone)]
pub struct Portfolio {
    account: Account,
    ledger: Ledger,
    sizer: LotSizer,
}

impl Portfolio {
    /// Creates a portfolio from the account and instrument configuration.
    #[must_use]
    pub fn new(account: &AccountConfig, instrument: &InstrumentConfig) -> Self {
        Self {
            account: Account::new(account.initial_balance),
            ledger: Ledger::new(instrument.pip_size),
            sizer: LotSizer::from_config(account, instrument),
        }
    }

    /// Starts a step: snapshots the previous balance and refreshes the peak.
    pub fn begin_step(&mut self) {
        self.account.begin_step();
    }

    /// Opens a position sized from the current balance.
    ///
    /// # Arguments
    /// * `direction` - Long or short
    /// * `price` - Reference (close) price
    /// * `spread` - Spread in price units
    /// * `step` - Series index of the entry bar
    /// * `time_ns` - Entry timestamp
    /// * `atr` - Volatility at entry
    pub fn open(
        &mut self,
        direction: Direction,
        price: f64,
        spread: f64,
        step: usize,
        time_ns: i64,
        atr: f64,
    ) -> OpenOutcome {
        let lot_size = self.sizer.lot_size(self.account.balance());
        self.ledger
            .open(direction, price, spread, lot_size, step, time_ns, atr)
    }

    /// Marks the open position; returns unrealized `PnL` (0 when flat).
    pub fn mark(&mut self, price: f64) -> f64 {
        self.ledger.mark(price)
    }

    /// Closes the open position and books its `PnL`.
    pub fn close(
        &mut self,
        price: f64,
        step: usize,
        time_ns: i64,
        reason: ExitReason,
    ) -> CloseOutcome {
        self.ledger
            .close(&mut self.account, price, step, time_ns, reason)
    }

    /// Unrealized `PnL` at `price` without touching the position.
    #[must_use]
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.ledger
            .position()
            .map_or(0.0, |p| p.unrealized_pnl(price))
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        self.account.reset();
        self.ledger.reset();
    }

    /// Returns the account state.
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Returns the ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the lot sizer.
    #[must_use]
    pub fn sizer(&self) -> &LotSizer {
        &self.sizer
    }

    /// Returns the open position, if any.
    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        self.ledger.position()
    }

    /// Returns all closed trades.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        self.ledger.trades()
    }

    /// Returns a snapshot of the running trade statistics.
    #[must_use]
    pub fn metrics(&self) -> TradeMetrics {
        self.ledger.metrics()
    }

    /// Returns the current balance.
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.account.balance()
    }

    /// Returns the current drawdown (0-1).
    #[must_use]
    pub fn drawdown(&self) -> f64 {
        self.account.drawdown()
    }

    /// Validates that the balance equals the initial balance plus the
    /// realized `PnL` of every trade, and that the win/loss counters agree
    /// with the history.
    ///
    /// # Errors
    /// Returns [`PortfolioError::ConsistencyViolation`],
    /// [`PortfolioError::CountMismatch`], or
    /// [`PortfolioError::NonFiniteValue`].
    pub fn validate_consistency(&self) -> Result<(), PortfolioError> {
        let ensure_finite = |field: &str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(PortfolioError::NonFiniteValue {
                    field: field.to_string(),
                    value,
                })
            }
        };

        let balance = self.account.balance();
        let realized: f64 = self.trades().iter().map(|t| t.pnl).sum();
        let expected = self.account.initial_balance() + realized;

        ensure_finite("balance", balance)?;
        ensure_finite("realized_pnl", realized)?;

        let diff = (balance - expected).abs();
        let tolerance = CONSISTENCY_EPS * expected.abs().max(1.0);
        if diff > tolerance {
            return Err(PortfolioError::ConsistencyViolation {
                balance,
                expected,
                diff,
                tolerance,
            });
        }

        let (wins, losses, trades) = (
            self.ledger.win_count(),
            self.ledger.loss_count(),
            self.trades().len(),
        );
        if wins + losses != trades {
            return Err(PortfolioError::CountMismatch {
                wins,
                losses,
                trades,
            });
        }

        Ok(())
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(&AccountConfig::default(), &InstrumentConfig::default())
    }
}
