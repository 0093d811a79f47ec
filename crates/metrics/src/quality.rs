//! Composite trade-quality score used to rank evaluation runs.

use pipgym_types::TradeMetrics;

const WIN_RATE_WEIGHT: f64 = 0.35;
const PROFIT_FACTOR_WEIGHT: f64 = 0.45;
const DRAWDOWN_WEIGHT: f64 = 0.2;
const PROFIT_FACTOR_CAP: f64 = 4.0;

/// Scores an episode in [0, 1]:
/// `0.35 * win_rate + 0.45 * min(pf, 4) / 4 + 0.2 * max(0, 1 - 2 * max_drawdown)`
/// with `pf = max(0, avg_profit) / (|avg_loss| + 1e-8)`.
///
/// `max_drawdown` is a fraction (0-1).
#[must_use]
pub fn trade_quality(metrics: &TradeMetrics, max_drawdown: f64) -> f64 {
    let profit_factor = metrics.avg_profit.max(0.0) / (metrics.avg_loss.abs() + 1e-8);
    let drawdown_score = (1.0 - max_drawdown * 2.0).max(0.0);

    metrics.win_rate * WIN_RATE_WEIGHT
        + profit_factor.min(PROFIT_FACTOR_CAP) / PROFIT_FACTOR_CAP * PROFIT_FACTOR_WEIGHT
        + drawdown_score * DRAWDOWN_WEIGHT
}
