//! Single-position ledger: the open slot, the closed-trade history, and
//! the running trade statistics.

use crate::account::Account;
use pipgym_types::{Direction, ExitReason, Position, Trade, TradeMetrics};

/// Signal returned when a close is requested with nothing open.
pub const NOTHING_TO_CLOSE_PENALTY: f64 = -0.1;

/// Hold time (bars) at which the close signal reaches full weight.
pub const FULL_WEIGHT_HOLD_BARS: f64 = 20.0;

/// Result of an open request.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    /// A new position was opened
    Opened(Position),
    /// A position already exists; nothing changed
    AlreadyOpen,
}

/// Result of a close request.
#[derive(Debug, Clone, PartialEq)]
pub enum CloseOutcome {
    /// The open position was realized into a trade
    Closed {
        /// The recorded trade
        trade: Trade,
        /// Hold-time-scaled close signal
        signal: f64,
    },
    /// No position was open; nothing changed
    NothingToClose {
        /// Fixed penalty signal
        penalty: f64,
    },
}

impl CloseOutcome {
    /// Close signal of either variant.
    #[must_use]
    pub fn signal(&self) -> f64 {
        match self {
            CloseOutcome::Closed { signal, .. } => *signal,
            CloseOutcome::NothingToClose { penalty } => *penalty,
        }
    }

    /// The recorded trade, if one was closed.
    #[must_use]
    pub fn trade(&self) -> Option<&Trade> {
        match self {
            CloseOutcome::Closed { trade, .. } => Some(trade),
            CloseOutcome::NothingToClose { .. } => None,
        }
    }
}

/// Hold-time-scaled close signal: `pnl / initial * 100 * min(1, hold / 20)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn close_signal(pnl: f64, hold_time: usize, initial_balance: f64) -> f64 {
    let hold_factor = (hold_time as f64 / FULL_WEIGHT_HOLD_BARS).min(1.0);
    pnl / initial_balance * 100.0 * hold_factor
}

/// Owns the (at most one) open position and the trade history.
#[derive(Debug, Clone)]
pub struct Ledger {
    position: Option<Position>,
    trades: Vec<Trade>,
    win_count: usize,
    loss_count: usize,
    metrics: TradeMetrics,
    pip_size: f64,
}

impl Ledger {
    /// Creates an empty ledger for an instrument with the given pip size.
    #[must_use]
    pub fn new(pip_size: f64) -> Self {
        Self {
            position: None,
            trades: Vec::new(),
            win_count: 0,
            loss_count: 0,
            metrics: TradeMetrics::default(),
            pip_size,
        }
    }

    /// Opens a position at `price` adjusted by `spread` against the trader.
    ///
    /// # Arguments
    /// * `direction` - Long or short
    /// * `price` - Reference (close) price
    /// * `spread` - Spread in price units
    /// * `lot_size` - Position size in lots
    /// * `step` - Series index of the entry bar
    /// * `time_ns` - Entry timestamp
    /// * `atr` - Volatility at entry
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        direction: Direction,
        price: f64,
        spread: f64,
        lot_size: f64,
        step: usize,
        time_ns: i64,
        atr: f64,
    ) -> OpenOutcome {
        if self.position.is_some() {
            return OpenOutcome::AlreadyOpen;
        }

        let position = Position {
            direction,
            entry_price: price + spread * direction.sign(),
            lot_size,
            entry_step: step,
            entry_time_ns: time_ns,
            entry_atr: atr,
            current_profit_pips: 0.0,
        };

        tracing::debug!(
            "Opened {:?} {} lots at {:.5} (step {})",
            direction,
            lot_size,
            position.entry_price,
            step
        );

        self.metrics.current_direction = direction.as_i8();
        self.position = Some(position.clone());
        OpenOutcome::Opened(position)
    }

    /// Marks the open position at `price`, refreshing its running pips.
    ///
    /// Returns the unrealized `PnL` (0 when flat).
    pub fn mark(&mut self, price: f64) -> f64 {
        let pip_size = self.pip_size;
        match self.position.as_mut() {
            Some(position) => {
                position.current_profit_pips = position.profit_points(price) / pip_size;
                position.unrealized_pnl(price)
            }
            None => 0.0,
        }
    }

    /// Realizes the open position at `price` and books the `PnL` on `account`.
    pub fn close(
        &mut self,
        account: &mut Account,
        price: f64,
        step: usize,
        time_ns: i64,
        reason: ExitReason,
    ) -> CloseOutcome {
        let Some(position) = self.position.take() else {
            tracing::warn!("Close requested at step {} with no open position", step);
            return CloseOutcome::NothingToClose {
                penalty: NOTHING_TO_CLOSE_PENALTY,
            };
        };

        let mut trade =
            Trade::from_position(&position, price, step, time_ns, self.pip_size, reason);
        let signal = close_signal(trade.pnl, trade.hold_time, account.initial_balance());
        trade.close_signal = signal;

        if trade.is_win() {
            self.win_count += 1;
        } else {
            self.loss_count += 1;
        }

        account.apply_pnl(trade.pnl);
        self.trades.push(trade.clone());
        self.metrics.current_direction = 0;
        self.metrics.refresh(&self.trades);

        tracing::debug!(
            "Closed {:?} at {:.5}: pnl={:.2}, pips={:.1}, hold={} ({:?})",
            trade.direction,
            price,
            trade.pnl,
            trade.profit_pips,
            trade.hold_time,
            reason
        );

        CloseOutcome::Closed { trade, signal }
    }

    /// Clears the position, history, counters, and statistics.
    pub fn reset(&mut self) {
        *self = Self::new(self.pip_size);
    }

    /// Open position, if any.
    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// `true` while a position is open.
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    /// Closed trades in exit order.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Number of trades with `pnl > 0`.
    #[must_use]
    pub fn win_count(&self) -> usize {
        self.win_count
    }

    /// Number of trades with `pnl <= 0`.
    #[must_use]
    pub fn loss_count(&self) -> usize {
        self.loss_count
    }

    /// Snapshot of the running trade statistics.
    #[must_use]
    pub fn metrics(&self) -> TradeMetrics {
        self.metrics
    }

    /// Pip size used for pip conversions.
    #[must_use]
    pub fn pip_size(&self) -> f64 {
        self.pip_size
    }
}
