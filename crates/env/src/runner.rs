//! High-level runner helpers: replay a fixed action script and summarize
//! the episode.

use pipgym_metrics::{EpisodeReport, trade_quality};
use pipgym_types::{Bar, EnvConfig, Trade};
use serde::{Deserialize, Serialize};

use crate::engine::TradingEnv;
use crate::episode::ResetOptions;
use crate::error::EnvError;

/// Outcome of replaying an action script over one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Steps actually taken (the script stops at termination)
    pub steps: usize,
    /// Sum of step rewards
    pub total_reward: f64,
    /// Balance after the last step
    pub final_balance: f64,
    /// The episode terminated before or at the end of the script
    pub terminated: bool,
    /// The episode reached the end of the data
    pub truncated: bool,
    /// Largest drawdown seen at any step, in percent
    pub max_drawdown_pct: f64,
    /// Final balance's drawdown from the episode peak as a fraction; 0 unless
    /// the peak rose above the initial balance
    pub eval_drawdown: f64,
    /// Composite trade-quality score in [0, 1], scored on `eval_drawdown`
    pub trade_quality: f64,
    /// Closed trades in order
    pub trades: Vec<Trade>,
    /// Final episode report, rounded for display
    pub report: EpisodeReport,
}

/// Replays `actions` from a fresh reset and summarizes the episode.
///
/// Stepping stops at the first terminal step; remaining actions are ignored.
///
/// # Errors
/// - [`EnvError::InvalidAction`] on an out-of-range action index.
/// - Any error from environment construction.
pub fn run_actions(
    config: EnvConfig,
    bars: &[Bar],
    actions: &[i64],
) -> Result<EpisodeSummary, EnvError> {
    let mut env = TradingEnv::new(bars, config)?;
    env.reset(None, ResetOptions::default());

    let mut steps = 0;
    let mut total_reward = 0.0;
    let mut max_drawdown_pct: f64 = 0.0;
    let initial_balance = env.portfolio().account().initial_balance();
    let mut peak_balance = initial_balance;
    let (mut terminated, mut truncated) = (false, false);

    for &action in actions {
        let outcome = env.step_index(action)?;
        steps += 1;
        total_reward += outcome.reward;
        max_drawdown_pct = max_drawdown_pct.max(outcome.info.drawdown_pct);
        peak_balance = peak_balance.max(outcome.info.balance);

        if outcome.terminated {
            terminated = true;
            truncated = outcome.truncated;
            break;
        }
    }

    let portfolio = env.portfolio();
    let eval_drawdown = eval_drawdown(initial_balance, peak_balance, portfolio.balance());
    Ok(EpisodeSummary {
        steps,
        total_reward,
        final_balance: portfolio.balance(),
        terminated,
        truncated,
        max_drawdown_pct,
        eval_drawdown,
        trade_quality: trade_quality(&portfolio.metrics(), eval_drawdown),
        trades: portfolio.trades().to_vec(),
        report: env.report().rounded(),
    })
}

/// Main entry point for JSON drivers: receives config JSON, returns the
/// summary JSON.
///
/// # Errors
/// - [`EnvError::ConfigParse`] when JSON parsing fails.
/// - [`EnvError::ConfigValidation`] for invalid configuration values.
/// - [`EnvError::ResultSerialize`] when the summary cannot be serialized.
/// - Any errors from environment construction or stepping.
pub fn run_actions_from_json(
    config_json: &str,
    bars: &[Bar],
    actions: &[i64],
) -> Result<String, EnvError> {
    let config: EnvConfig =
        serde_json::from_str(config_json).map_err(|e| EnvError::ConfigParse(e.to_string()))?;

    validate_config(&config)?;

    let summary = run_actions(config, bars, actions)?;

    serde_json::to_string(&summary).map_err(|e| EnvError::ResultSerialize(e.to_string()))
}

/// YAML flavour of [`run_actions_from_json`]; the summary is still JSON.
///
/// # Errors
/// Same as [`run_actions_from_json`], with YAML parse failures reported as
/// [`EnvError::ConfigParse`].
pub fn run_actions_from_yaml(
    config_yaml: &str,
    bars: &[Bar],
    actions: &[i64],
) -> Result<String, EnvError> {
    let config = EnvConfig::from_yaml(config_yaml)?;

    validate_config(&config)?;

    let summary = run_actions(config, bars, actions)?;

    serde_json::to_string(&summary).map_err(|e| EnvError::ResultSerialize(e.to_string()))
}

/// Drawdown of `final_balance` from `peak`, counted only once the peak
/// exceeded the initial balance.
fn eval_drawdown(initial: f64, peak: f64, final_balance: f64) -> f64 {
    if peak > initial {
        (peak - final_balance) / peak
    } else {
        0.0
    }
}

fn validate_config(config: &EnvConfig) -> Result<(), EnvError> {
    config.validate()?;

    if config.random_start && config.min_runway == 0 {
        return Err(EnvError::ConfigValidation(
            "min_runway must be > 0 when random_start is set".to_string(),
        ));
    }

    Ok(())
}
