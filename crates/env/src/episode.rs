//! Episode bookkeeping: the data cursor and the values exchanged with the
//! caller on `reset` and `step`.

use pipgym_types::{Observation, Position, TradeMetrics};
use serde::{Deserialize, Serialize};

/// Per-reset overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOptions {
    /// Overrides the configured `random_start` flag for this episode
    #[serde(default)]
    pub random_start: Option<bool>,
}

/// Auxiliary data returned by `reset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetInfo {
    /// Balance at the start of the episode
    pub balance: f64,
    /// Always `None` after a reset
    pub position: Option<Position>,
}

/// Auxiliary data returned by `step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Balance after the step
    pub balance: f64,
    /// Realized `PnL` since the episode started
    pub total_pnl: f64,
    /// Drawdown in percent, measured before any forced liquidation
    pub drawdown_pct: f64,
    /// Open position snapshot
    pub position: Option<Position>,
    /// Running trade statistics
    pub trade_metrics: TradeMetrics,
    /// Close signal of a `Close` action (penalty when nothing was open)
    pub close_signal: Option<f64>,
    /// Cursor after the step
    pub step: usize,
}

/// Result of one `step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Features at the new cursor plus normalized unrealized `PnL`
    pub observation: Observation,
    /// Balance change relative to the initial balance
    pub reward: f64,
    /// End of data, bankruptcy, or drawdown limit reached
    pub terminated: bool,
    /// End of data reached
    pub truncated: bool,
    /// Auxiliary data
    pub info: StepInfo,
}

/// Position of the environment inside its data and across episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeCursor {
    step: usize,
    episode_steps: usize,
    completed_episodes: u64,
    finished: bool,
    last: usize,
}

impl EpisodeCursor {
    /// Creates a cursor at row 0 over `rows` rows of data.
    #[must_use]
    pub fn new(rows: usize) -> Self {
        Self {
            step: 0,
            episode_steps: 0,
            completed_episodes: 0,
            finished: false,
            last: rows.saturating_sub(1),
        }
    }

    /// Starts a new episode at `start` (clamped so at least one step fits).
    pub fn restart(&mut self, start: usize) {
        self.step = start.min(self.last.saturating_sub(1));
        self.episode_steps = 0;
        self.finished = false;
        self.completed_episodes += 1;
    }

    /// Moves one row forward and returns the new row.
    pub fn advance(&mut self) -> usize {
        self.step += 1;
        self.episode_steps += 1;
        self.step
    }

    /// Marks the episode terminated.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Current row.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Steps taken since the last reset.
    #[must_use]
    pub fn episode_steps(&self) -> usize {
        self.episode_steps
    }

    /// Number of resets so far.
    #[must_use]
    pub fn completed_episodes(&self) -> u64 {
        self.completed_episodes
    }

    /// `true` once the episode terminated.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `true` when the cursor sits on the final row.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.step >= self.last
    }

    /// Index of the final row.
    #[must_use]
    pub fn last(&self) -> usize {
        self.last
    }
}
