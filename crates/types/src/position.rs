use crate::action::Direction;

/// Open position
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Direction of the position
    pub direction: Direction,
    /// Entry price (spread already applied)
    pub entry_price: f64,
    /// Position size in lots
    pub lot_size: f64,
    /// Series index of the entry bar
    pub entry_step: usize,
    /// Entry timestamp in nanoseconds
    pub entry_time_ns: i64,
    /// Volatility (ATR) at entry
    pub entry_atr: f64,
    /// Running profit in pips, refreshed on every mark
    pub current_profit_pips: f64,
}

impl Position {
    /// Price delta in the position's favor at `price`.
    #[must_use]
    pub fn profit_points(&self, price: f64) -> f64 {
        (price - self.entry_price) * self.direction.sign()
    }

    /// Unrealized `PnL` at `price` in account currency.
    #[must_use]
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.profit_points(price) * self.lot_size
    }

    /// Bars held as of `step`.
    #[must_use]
    pub fn hold_time(&self, step: usize) -> usize {
        step.saturating_sub(self.entry_step)
    }
}
