//! Helpers for trade-derived metrics.

use pipgym_types::{Direction, Trade};

/// Arithmetic mean, `None` for an empty input.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Trade counts never exceed f64 mantissa precision
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Share of `part` in `total` in percent (0 when `total` is 0).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Trades with strictly positive `PnL`.
pub(crate) fn winners(trades: &[Trade]) -> impl Iterator<Item = &Trade> {
    trades.iter().filter(|trade| trade.pnl > 0.0)
}

/// Trades with strictly negative `PnL` (break-even trades are neither).
pub(crate) fn losers(trades: &[Trade]) -> impl Iterator<Item = &Trade> {
    trades.iter().filter(|trade| trade.pnl < 0.0)
}

/// Computes gross profit and gross loss (sum of negative results, kept negative).
#[must_use]
pub(crate) fn gross_profit_loss(trades: &[Trade]) -> (f64, f64) {
    let gross_profit = winners(trades).map(|trade| trade.pnl).sum();
    let gross_loss = losers(trades).map(|trade| trade.pnl).sum();
    (gross_profit, gross_loss)
}

/// `|gross_profit / gross_loss|`, `None` (infinite) when there is no loss.
#[must_use]
pub(crate) fn profit_factor(trades: &[Trade]) -> Option<f64> {
    let (gross_profit, gross_loss) = gross_profit_loss(trades);
    (gross_loss != 0.0).then(|| (gross_profit / gross_loss).abs())
}

/// Trades opened in `direction`.
pub(crate) fn by_direction(
    trades: &[Trade],
    direction: Direction,
) -> impl Iterator<Item = &Trade> {
    trades
        .iter()
        .filter(move |trade| trade.direction == direction)
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn hold_time_f64(trade: &Trade) -> f64 {
    trade.hold_time as f64
}
