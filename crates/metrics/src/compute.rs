//! Episode report computation.

use pipgym_types::{Direction, Trade};

use crate::output::{DirectionalStats, EpisodeReport, HoldTimeBreakdown, OpenPositionReport, TradeSummary};
use crate::trade_metrics::{by_direction, hold_time_f64, losers, mean, percent, profit_factor, winners};

/// Episode state the report is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSnapshot {
    /// Episodes started so far (1-based after the first reset)
    pub episode: u64,
    /// Steps taken in the current episode
    pub episode_steps: usize,
    /// Initial balance
    pub initial_balance: f64,
    /// Current balance
    pub balance: f64,
    /// High-water mark of the balance
    pub max_balance: f64,
    /// Open position detail, if any
    pub position: Option<OpenPositionReport>,
}

/// Computes the read-only episode report.
#[must_use]
pub fn compute_report(snapshot: &EpisodeSnapshot, trades: &[Trade]) -> EpisodeReport {
    let total_return_pct =
        (snapshot.balance - snapshot.initial_balance) / snapshot.initial_balance * 100.0;
    let current_drawdown_pct = if snapshot.max_balance > 0.0 {
        (snapshot.max_balance - snapshot.balance) / snapshot.max_balance * 100.0
    } else {
        0.0
    };

    EpisodeReport {
        episode: snapshot.episode,
        episode_steps: snapshot.episode_steps,
        balance: snapshot.balance,
        total_return_pct,
        current_drawdown_pct,
        position: snapshot.position.clone(),
        trades: summarize_trades(trades),
    }
}

/// Aggregates closed trades; `None` when there are none.
#[must_use]
pub fn summarize_trades(trades: &[Trade]) -> Option<TradeSummary> {
    if trades.is_empty() {
        return None;
    }

    let total_trades = trades.len();

    Some(TradeSummary {
        total_trades,
        win_rate_pct: percent(winners(trades).count(), total_trades),
        avg_win: mean(winners(trades).map(|t| t.pnl)),
        avg_loss: mean(losers(trades).map(|t| t.pnl)),
        profit_factor: profit_factor(trades),
        hold_time: HoldTimeBreakdown {
            all: mean(trades.iter().map(hold_time_f64)),
            winners: mean(winners(trades).map(hold_time_f64)),
            losers: mean(losers(trades).map(hold_time_f64)),
        },
        long: directional(trades, Direction::Long),
        short: directional(trades, Direction::Short),
    })
}

fn directional(trades: &[Trade], direction: Direction) -> DirectionalStats {
    let count = by_direction(trades, direction).count();
    let wins = by_direction(trades, direction)
        .filter(|t| t.pnl > 0.0)
        .count();

    DirectionalStats {
        count,
        share_pct: percent(count, trades.len()),
        win_rate_pct: (count > 0).then(|| percent(wins, count)),
        avg_pnl: mean(by_direction(trades, direction).map(|t| t.pnl)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pipgym_types::ExitReason;

    fn trade(direction: Direction, pnl: f64, hold_time: usize) -> Trade {
        Trade {
            direction,
            entry_price: 1.0,
            exit_price: 1.0,
            lot_size: 1.0,
            entry_step: 0,
            exit_step: hold_time,
            entry_time_ns: 0,
            exit_time_ns: 0,
            entry_atr: 0.0,
            profit_pips: 0.0,
            pnl,
            hold_time,
            close_signal: 0.0,
            reason: ExitReason::Agent,
        }
    }

    fn snapshot(balance: f64, max_balance: f64) -> EpisodeSnapshot {
        EpisodeSnapshot {
            episode: 1,
            episode_steps: 42,
            initial_balance: 10_000.0,
            balance,
            max_balance,
            position: None,
        }
    }

    #[test]
    fn test_report_without_trades() {
        let report = compute_report(&snapshot(10_000.0, 10_000.0), &[]);

        assert!(report.trades.is_none());
        assert_relative_eq!(report.total_return_pct, 0.0);
        assert_relative_eq!(report.current_drawdown_pct, 0.0);
    }

    #[test]
    fn test_report_with_trades() {
        let trades = vec![
            trade(Direction::Long, 30.0, 10),
            trade(Direction::Long, -10.0, 4),
            trade(Direction::Short, 20.0, 6),
            trade(Direction::Short, 0.0, 2),
        ];
        let report = compute_report(&snapshot(10_040.0, 10_050.0), &trades);
        let summary = report.trades.unwrap();

        assert_relative_eq!(report.total_return_pct, 0.4, epsilon = 1e-9);
        assert_relative_eq!(report.current_drawdown_pct, 10.0 / 10_050.0 * 100.0);

        assert_eq!(summary.total_trades, 4);
        assert_relative_eq!(summary.win_rate_pct, 50.0);
        assert_relative_eq!(summary.avg_win.unwrap(), 25.0);
        assert_relative_eq!(summary.avg_loss.unwrap(), -10.0);
        assert_relative_eq!(summary.profit_factor.unwrap(), 5.0);

        assert_relative_eq!(summary.hold_time.all.unwrap(), 5.5);
        assert_relative_eq!(summary.hold_time.winners.unwrap(), 8.0);
        assert_relative_eq!(summary.hold_time.losers.unwrap(), 4.0);

        assert_eq!(summary.long.count, 2);
        assert_relative_eq!(summary.long.share_pct, 50.0);
        assert_relative_eq!(summary.long.win_rate_pct.unwrap(), 50.0);
        assert_relative_eq!(summary.long.avg_pnl.unwrap(), 10.0);
        assert_relative_eq!(summary.short.avg_pnl.unwrap(), 10.0);
    }

    #[test]
    fn test_one_sided_history() {
        let trades = vec![trade(Direction::Short, 5.0, 3)];
        let summary = summarize_trades(&trades).unwrap();

        assert!(summary.profit_factor.is_none());
        assert!(summary.avg_loss.is_none());
        assert!(summary.hold_time.losers.is_none());
        assert_eq!(summary.long.count, 0);
        assert!(summary.long.win_rate_pct.is_none());
        assert!(summary.long.avg_pnl.is_none());
        assert_relative_eq!(summary.short.share_pct, 100.0);
    }
}
