//! Report structures and their human-readable rendering.

use std::fmt;

use pipgym_types::Direction;
use serde::{Deserialize, Serialize};

const CURRENCY_DECIMALS: u32 = 2;
const RATIO_DECIMALS: u32 = 6;

/// Detail of the open position at report time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPositionReport {
    /// Long or short
    pub direction: Direction,
    /// Entry price (spread applied)
    pub entry_price: f64,
    /// Close at the current cursor
    pub current_price: f64,
    /// Position size in lots
    pub lot_size: f64,
    /// Unrealized `PnL` at the current price
    pub unrealized_pnl: f64,
    /// Bars held so far
    pub hold_time: usize,
}

/// Average hold time in bars; `None` where the group is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldTimeBreakdown {
    /// Over all trades
    pub all: Option<f64>,
    /// Over trades with `pnl > 0`
    pub winners: Option<f64>,
    /// Over trades with `pnl < 0`
    pub losers: Option<f64>,
}

/// Per-direction statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalStats {
    /// Trades in this direction
    pub count: usize,
    /// Share of all trades in percent
    pub share_pct: f64,
    /// Win rate in percent (`None` without trades)
    pub win_rate_pct: Option<f64>,
    /// Mean `PnL` (`None` without trades)
    pub avg_pnl: Option<f64>,
}

/// Aggregate statistics over the closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    /// Number of closed trades
    pub total_trades: usize,
    /// Winners (`pnl > 0`) over all trades in percent
    pub win_rate_pct: f64,
    /// Mean winning `PnL`
    pub avg_win: Option<f64>,
    /// Mean losing `PnL` (negative)
    pub avg_loss: Option<f64>,
    /// `|gross profit / gross loss|`; `None` means infinite (no losses)
    pub profit_factor: Option<f64>,
    /// Hold-time analysis
    pub hold_time: HoldTimeBreakdown,
    /// Long-side statistics
    pub long: DirectionalStats,
    /// Short-side statistics
    pub short: DirectionalStats,
}

/// Read-only snapshot of an episode's state and performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    /// Episode counter
    pub episode: u64,
    /// Steps taken in this episode
    pub episode_steps: usize,
    /// Current balance
    pub balance: f64,
    /// Return since the episode start in percent
    pub total_return_pct: f64,
    /// Drawdown from the balance high-water mark in percent
    pub current_drawdown_pct: f64,
    /// Open position detail
    pub position: Option<OpenPositionReport>,
    /// Closed-trade statistics (`None` before the first trade)
    pub trades: Option<TradeSummary>,
}

impl EpisodeReport {
    /// Copy with values rounded for serialization: currency to 2 decimals,
    /// percentages and ratios to 6.
    #[must_use]
    pub fn rounded(&self) -> Self {
        let money = |v: f64| round_to_decimals(v, CURRENCY_DECIMALS);
        let ratio = |v: f64| round_to_decimals(v, RATIO_DECIMALS);

        let mut report = self.clone();
        report.balance = money(report.balance);
        report.total_return_pct = ratio(report.total_return_pct);
        report.current_drawdown_pct = ratio(report.current_drawdown_pct);

        if let Some(position) = report.position.as_mut() {
            position.unrealized_pnl = money(position.unrealized_pnl);
        }

        if let Some(summary) = report.trades.as_mut() {
            summary.win_rate_pct = ratio(summary.win_rate_pct);
            summary.avg_win = summary.avg_win.map(money);
            summary.avg_loss = summary.avg_loss.map(money);
            summary.profit_factor = summary.profit_factor.map(ratio);
            for side in [&mut summary.long, &mut summary.short] {
                side.share_pct = ratio(side.share_pct);
                side.win_rate_pct = side.win_rate_pct.map(ratio);
                side.avg_pnl = side.avg_pnl.map(money);
            }
        }

        report
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Long => "Long",
        Direction::Short => "Short",
    }
}

fn or_na(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.decimals$}"))
}

impl fmt::Display for EpisodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "===== Episode {}, Step {} =====",
            self.episode, self.episode_steps
        )?;
        writeln!(f, "Current Balance: {:.2}", self.balance)?;

        match &self.position {
            None => writeln!(f, "Current Position: None")?,
            Some(position) => {
                writeln!(f, "Current Position: {}", direction_label(position.direction))?;
                writeln!(f, "Position Details:")?;
                writeln!(f, "  Entry Price: {:.5}", position.entry_price)?;
                writeln!(f, "  Current Price: {:.5}", position.current_price)?;
                writeln!(f, "  Lot Size: {:.2}", position.lot_size)?;
                writeln!(f, "  Unrealized P/L: {:.2}", position.unrealized_pnl)?;
                writeln!(f, "  Hold Time: {} bars", position.hold_time)?;
            }
        }

        let Some(summary) = &self.trades else {
            return write!(f, "No completed trades yet.");
        };

        writeln!(f, "===== Performance Metrics =====")?;
        writeln!(f, "Total Return: {:.2}%", self.total_return_pct)?;
        writeln!(f, "Total Trades: {}", summary.total_trades)?;
        writeln!(f, "Overall Win Rate: {:.2}%", summary.win_rate_pct)?;
        writeln!(f, "Average Win: {}", or_na(summary.avg_win, 2))?;
        writeln!(f, "Average Loss: {}", or_na(summary.avg_loss, 2))?;
        match summary.profit_factor {
            Some(pf) => writeln!(f, "Profit Factor: {pf:.2}")?,
            None => writeln!(f, "Profit Factor: \u{221e}")?,
        }
        writeln!(f, "Current Drawdown: {:.2}%", self.current_drawdown_pct)?;

        writeln!(f, "===== Hold Time Analysis =====")?;
        writeln!(f, "Average Hold Time: {} bars", or_na(summary.hold_time.all, 1))?;
        writeln!(f, "Winners Hold Time: {} bars", or_na(summary.hold_time.winners, 1))?;
        writeln!(f, "Losers Hold Time: {} bars", or_na(summary.hold_time.losers, 1))?;

        writeln!(f, "===== Directional Performance =====")?;
        for (label, side) in [("Long", &summary.long), ("Short", &summary.short)] {
            writeln!(f, "{label} Trades: {} ({:.1}%)", side.count, side.share_pct)?;
            match (side.win_rate_pct, side.avg_pnl) {
                (Some(win_rate), Some(avg_pnl)) => writeln!(
                    f,
                    "{label} Win Rate: {win_rate:.1}% (Avg PnL: {avg_pnl:.2})"
                )?,
                _ => writeln!(f, "{label} Win Rate: N/A")?,
            }
        }

        Ok(())
    }
}

#[allow(clippy::cast_possible_wrap)] // decimals is always small (< 10)
fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_report() -> EpisodeReport {
        EpisodeReport {
            episode: 3,
            episode_steps: 17,
            balance: 10_123.456,
            total_return_pct: 1.23456789,
            current_drawdown_pct: 0.0,
            position: None,
            trades: None,
        }
    }

    #[test]
    fn test_display_without_trades() {
        let text = flat_report().to_string();

        assert!(text.starts_with("===== Episode 3, Step 17 ====="));
        assert!(text.contains("Current Balance: 10123.46"));
        assert!(text.contains("Current Position: None"));
        assert!(text.ends_with("No completed trades yet."));
    }

    #[test]
    fn test_display_open_position_and_infinite_pf() {
        let mut report = flat_report();
        report.position = Some(OpenPositionReport {
            direction: Direction::Short,
            entry_price: 1.10002,
            current_price: 1.09,
            lot_size: 10.0,
            unrealized_pnl: 0.1,
            hold_time: 4,
        });
        report.trades = Some(TradeSummary {
            total_trades: 1,
            win_rate_pct: 100.0,
            avg_win: Some(12.5),
            avg_loss: None,
            profit_factor: None,
            hold_time: HoldTimeBreakdown {
                all: Some(3.0),
                winners: Some(3.0),
                losers: None,
            },
            long: DirectionalStats {
                count: 1,
                share_pct: 100.0,
                win_rate_pct: Some(100.0),
                avg_pnl: Some(12.5),
            },
            short: DirectionalStats {
                count: 0,
                share_pct: 0.0,
                win_rate_pct: None,
                avg_pnl: None,
            },
        });

        let text = report.to_string();
        assert!(text.contains("Current Position: Short"));
        assert!(text.contains("  Entry Price: 1.10002"));
        assert!(text.contains("  Hold Time: 4 bars"));
        assert!(text.contains("Profit Factor: \u{221e}"));
        assert!(text.contains("Average Loss: n/a"));
        assert!(text.contains("Long Win Rate: 100.0% (Avg PnL: 12.50)"));
        assert!(text.contains("Short Win Rate: N/A"));
    }

    #[test]
    fn test_rounded() {
        let rounded = flat_report().rounded();
        assert_relative_eq!(rounded.balance, 10_123.46);
        assert_relative_eq!(rounded.total_return_pct, 1.234568);
    }
}
