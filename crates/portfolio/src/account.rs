//! Account balance and drawdown tracking.
//!
//! Balance only changes on realized `PnL`; the peak is refreshed at the
//! start of each step, before that step's action.

use serde::{Deserialize, Serialize};

/// Realized account state for one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Initial balance
    initial_balance: f64,
    /// Current balance (realized funds)
    balance: f64,
    /// High-water mark of the balance
    max_balance: f64,
    /// Balance at the start of the current step
    previous_balance: f64,
}

impl Account {
    /// Creates an account with the given initial balance.
    #[must_use]
    pub fn new(initial_balance: f64) -> Self {
        Self {
            initial_balance,
            balance: initial_balance,
            max_balance: initial_balance,
            previous_balance: initial_balance,
        }
    }

    /// Snapshots the previous balance and refreshes the high-water mark.
    pub fn begin_step(&mut self) {
        self.previous_balance = self.balance;
        self.max_balance = self.max_balance.max(self.balance);
    }

    /// Books realized `PnL`.
    pub fn apply_pnl(&mut self, pnl: f64) {
        self.balance += pnl;
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        *self = Self::new(self.initial_balance);
    }

    /// Returns the initial balance.
    #[must_use]
    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    /// Returns the current balance.
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Returns the high-water mark.
    #[must_use]
    pub fn max_balance(&self) -> f64 {
        self.max_balance
    }

    /// Returns the balance at the start of the current step.
    #[must_use]
    pub fn previous_balance(&self) -> f64 {
        self.previous_balance
    }

    /// Current drawdown as a fraction (0-1) of the high-water mark.
    #[must_use]
    pub fn drawdown(&self) -> f64 {
        if self.max_balance > 0.0 {
            (self.max_balance - self.balance) / self.max_balance
        } else {
            0.0
        }
    }

    /// Balance change over the current step relative to the initial balance.
    #[must_use]
    pub fn step_reward(&self) -> f64 {
        (self.balance - self.previous_balance) / self.initial_balance
    }

    /// Realized `PnL` since the start of the episode.
    #[must_use]
    pub fn total_pnl(&self) -> f64 {
        self.balance - self.initial_balance
    }

    /// Total return in percent.
    #[must_use]
    pub fn total_return_pct(&self) -> f64 {
        self.total_pnl() / self.initial_balance * 100.0
    }

    /// `true` once the balance is exhausted.
    #[must_use]
    pub fn is_bankrupt(&self) -> bool {
        self.balance <= 0.0
    }
}
