use crate::action::Direction;
use crate::position::Position;

/// Reason a position was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Closed by a `Close` action
    Agent,
    /// Force-closed because the episode terminated
    EndOfEpisode,
}

/// Completed trade
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    /// Direction of the trade
    pub direction: Direction,
    /// Entry price (spread applied)
    pub entry_price: f64,
    /// Exit price
    pub exit_price: f64,
    /// Position size in lots
    pub lot_size: f64,
    /// Series index of the entry bar
    pub entry_step: usize,
    /// Series index of the exit bar
    pub exit_step: usize,
    /// Entry timestamp in nanoseconds
    pub entry_time_ns: i64,
    /// Exit timestamp in nanoseconds
    pub exit_time_ns: i64,
    /// Volatility (ATR) at entry
    pub entry_atr: f64,
    /// Realized profit in pips
    pub profit_pips: f64,
    /// Realized `PnL` in account currency
    pub pnl: f64,
    /// Bars between entry and exit
    pub hold_time: usize,
    /// Hold-time-scaled close signal (reporting only, never the step reward)
    pub close_signal: f64,
    /// Reason for exit
    pub reason: ExitReason,
}

impl Trade {
    /// Builds the closed record for `position` exiting at `exit_price`.
    #[must_use]
    pub fn from_position(
        position: &Position,
        exit_price: f64,
        exit_step: usize,
        exit_time_ns: i64,
        pip_size: f64,
        reason: ExitReason,
    ) -> Self {
        let profit_points = position.profit_points(exit_price);
        Self {
            direction: position.direction,
            entry_price: position.entry_price,
            exit_price,
            lot_size: position.lot_size,
            entry_step: position.entry_step,
            exit_step,
            entry_time_ns: position.entry_time_ns,
            exit_time_ns,
            entry_atr: position.entry_atr,
            profit_pips: profit_points / pip_size,
            pnl: profit_points * position.lot_size,
            hold_time: position.hold_time(exit_step),
            close_signal: 0.0,
            reason,
        }
    }

    /// `true` for strictly positive `PnL`.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }
}

/// Aggregate trade statistics derived from the closed trades and the open position.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct TradeMetrics {
    /// Winners / total trades (0 when no trades)
    pub win_rate: f64,
    /// Mean `PnL` over trades with `pnl > 0`
    pub avg_profit: f64,
    /// Mean `PnL` over trades with `pnl <= 0` (non-positive)
    pub avg_loss: f64,
    /// +1 long, -1 short, 0 flat
    pub current_direction: i8,
}

impl TradeMetrics {
    /// Recomputes win rate and averages from the full trade history.
    /// `current_direction` is left untouched.
    #[allow(clippy::cast_precision_loss)]
    pub fn refresh(&mut self, trades: &[Trade]) {
        if trades.is_empty() {
            return;
        }

        let (mut win_sum, mut win_n, mut loss_sum, mut loss_n) = (0.0, 0usize, 0.0, 0usize);
        for trade in trades {
            if trade.is_win() {
                win_sum += trade.pnl;
                win_n += 1;
            } else {
                loss_sum += trade.pnl;
                loss_n += 1;
            }
        }

        self.win_rate = win_n as f64 / trades.len() as f64;
        self.avg_profit = if win_n > 0 { win_sum / win_n as f64 } else { 0.0 };
        self.avg_loss = if loss_n > 0 { loss_sum / loss_n as f64 } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(pnl: f64) -> Trade {
        Trade {
            direction: Direction::Long,
            entry_price: 1.1000,
            exit_price: 1.1050,
            lot_size: 1.0,
            entry_step: 3,
            exit_step: 8,
            entry_time_ns: 1_234_567_890_000_000_000,
            exit_time_ns: 1_234_567_900_000_000_000,
            entry_atr: 0.001,
            profit_pips: 50.0,
            pnl,
            hold_time: 5,
            close_signal: 0.0,
            reason: ExitReason::Agent,
        }
    }

    #[test]
    fn test_trade_serde_roundtrip() {
        let t = trade(0.005);
        let json = serde_json::to_string(&t).unwrap();
        let deserialized: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(t, deserialized);
    }

    #[test]
    fn test_exit_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&ExitReason::EndOfEpisode).unwrap(),
            "\"end_of_episode\""
        );
    }

    #[test]
    fn test_metrics_treat_breakeven_as_loss() {
        let trades = vec![trade(10.0), trade(0.0), trade(-4.0), trade(30.0)];
        let mut metrics = TradeMetrics::default();
        metrics.refresh(&trades);

        assert!((metrics.win_rate - 0.5).abs() < 1e-12);
        assert!((metrics.avg_profit - 20.0).abs() < 1e-12);
        assert!((metrics.avg_loss + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_metrics_refresh_empty_is_noop() {
        let mut metrics = TradeMetrics {
            current_direction: 1,
            ..TradeMetrics::default()
        };
        metrics.refresh(&[]);
        assert_eq!(metrics.current_direction, 1);
        assert!(metrics.win_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_position_short() {
        let position = Position {
            direction: Direction::Short,
            entry_price: 1.2000,
            lot_size: 3.0,
            entry_step: 4,
            entry_time_ns: 0,
            entry_atr: 0.002,
            current_profit_pips: 0.0,
        };
        let t = Trade::from_position(&position, 1.1990, 9, 10, 0.0001, ExitReason::Agent);
        assert!((t.pnl - 0.003).abs() < 1e-12);
        assert!((t.profit_pips - 10.0).abs() < 1e-9);
        assert_eq!(t.hold_time, 5);
    }
}
