//! Trading environment: reset/step state machine over a prepared feature
//! matrix.

use std::time::{SystemTime, UNIX_EPOCH};

use pipgym_data::validate_timestamps;
use pipgym_indicators::{FeaturePipeline, IndicatorError};
use pipgym_metrics::{EpisodeReport, EpisodeSnapshot, OpenPositionReport, compute_report};
use pipgym_portfolio::Portfolio;
use pipgym_types::{
    Action, Bar, EnvConfig, ExitReason, FEATURE_COUNT, MarketData, OBSERVATION_SIZE, Observation,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::episode::{EpisodeCursor, ResetInfo, ResetOptions, StepInfo, StepOutcome};
use crate::error::EnvError;

/// Rows needed to take at least one step.
const MIN_ROWS: usize = 2;

/// Single-instrument, single-position trading environment.
///
/// Owns its market data, so independent instances can run on separate
/// threads.
#[derive(Debug, Clone)]
pub struct TradingEnv {
    config: EnvConfig,
    data: MarketData,
    portfolio: Portfolio,
    cursor: EpisodeCursor,
    rng: ChaCha8Rng,
}

impl TradingEnv {
    /// Builds the feature matrix from raw bars and creates the environment.
    ///
    /// Rows with undefined features (NaN cells included) are dropped by the
    /// feature build rather than rejected.
    ///
    /// # Errors
    /// - [`EnvError::ConfigValidation`] for invalid configuration values.
    /// - [`EnvError::Data`] when timestamps are not strictly increasing.
    /// - [`EnvError::Indicator`] when too few rows survive warm-up trimming.
    pub fn new(bars: &[Bar], config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        validate_timestamps(bars)?;

        let data = FeaturePipeline::new(config.features.clone()).build(bars)?;
        Self::from_market_data(data, config)
    }

    /// Creates the environment over an already prepared feature matrix.
    ///
    /// # Errors
    /// - [`EnvError::ConfigValidation`] for invalid configuration values.
    /// - [`EnvError::Indicator`] when the matrix has fewer than two rows.
    pub fn from_market_data(data: MarketData, config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        if data.len() < MIN_ROWS {
            return Err(IndicatorError::InsufficientData {
                required: MIN_ROWS,
                available: data.len(),
            }
            .into());
        }

        let seed = config.rng_seed.unwrap_or_else(random_seed);
        let portfolio = Portfolio::new(&config.account, &config.instrument);
        let cursor = EpisodeCursor::new(data.len());

        Ok(Self {
            config,
            data,
            portfolio,
            cursor,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Starts a new episode.
    ///
    /// A `seed` reseeds the start-offset generator. With random start the
    /// first row is drawn uniformly from `[0, len - min_runway]`.
    pub fn reset(&mut self, seed: Option<u64>, options: ResetOptions) -> (Observation, ResetInfo) {
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }

        let random_start = options.random_start.unwrap_or(self.config.random_start);
        let start = if random_start {
            let max_start = self.data.len().saturating_sub(self.config.min_runway);
            self.rng.gen_range(0..=max_start)
        } else {
            0
        };

        self.portfolio.reset();
        self.cursor.restart(start);

        tracing::info!(
            "Episode {} reset: start row {} of {} (random_start={})",
            self.cursor.completed_episodes(),
            self.cursor.step(),
            self.data.len(),
            random_start
        );

        let info = ResetInfo {
            balance: self.portfolio.balance(),
            position: None,
        };
        (self.observation(), info)
    }

    /// Advances one bar and applies `action`.
    ///
    /// # Errors
    /// [`EnvError::EpisodeFinished`] when the episode already terminated.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome, EnvError> {
        if self.cursor.is_finished() {
            return Err(EnvError::EpisodeFinished);
        }

        let point_value = self.config.instrument.point_value;
        let spread = self.data.prices().spread()[self.cursor.step()] * point_value;
        self.portfolio.begin_step();

        let step = self.cursor.advance();
        let prices = self.data.prices();
        let (price, time_ns, atr) = (
            prices.close()[step],
            prices.timestamps()[step],
            prices.atr()[step],
        );

        let mut close_signal = None;
        match action {
            Action::Buy | Action::Sell => {
                if let Some(direction) = action.entry_direction() {
                    self.portfolio
                        .open(direction, price, spread, step, time_ns, atr);
                }
            }
            Action::Close => {
                let outcome = self
                    .portfolio
                    .close(price, step, time_ns, ExitReason::Agent);
                close_signal = Some(outcome.signal());
            }
            Action::Hold => {}
        }

        self.portfolio.mark(price);

        let drawdown = self.portfolio.drawdown();
        let truncated = self.cursor.at_end();
        let terminated = truncated
            || self.portfolio.account().is_bankrupt()
            || drawdown >= self.config.account.max_drawdown;

        if terminated {
            if let Some(position) = self.portfolio.position() {
                tracing::warn!(
                    "Force-closing {:?} position at episode end (step {}, drawdown {:.2}%)",
                    position.direction,
                    step,
                    drawdown * 100.0
                );
                self.portfolio
                    .close(price, step, time_ns, ExitReason::EndOfEpisode);
            }
            self.cursor.finish();
        }

        let account = self.portfolio.account();
        let info = StepInfo {
            balance: account.balance(),
            total_pnl: account.total_pnl(),
            drawdown_pct: drawdown * 100.0,
            position: self.portfolio.position().cloned(),
            trade_metrics: self.portfolio.metrics(),
            close_signal,
            step,
        };

        Ok(StepOutcome {
            observation: self.observation(),
            reward: account.step_reward(),
            terminated,
            truncated,
            info,
        })
    }

    /// Decodes an integer action and steps.
    ///
    /// # Errors
    /// - [`EnvError::InvalidAction`] outside `0..=3`.
    /// - [`EnvError::EpisodeFinished`] when the episode already terminated.
    pub fn step_index(&mut self, action: i64) -> Result<StepOutcome, EnvError> {
        let action = Action::try_from(action)?;
        self.step(action)
    }

    /// Computes the read-only episode report.
    #[must_use]
    pub fn report(&self) -> EpisodeReport {
        let step = self.cursor.step();
        let price = self.data.prices().close()[step];
        let account = self.portfolio.account();

        let position = self.portfolio.position().map(|p| OpenPositionReport {
            direction: p.direction,
            entry_price: p.entry_price,
            current_price: price,
            lot_size: p.lot_size,
            unrealized_pnl: p.unrealized_pnl(price),
            hold_time: p.hold_time(step),
        });

        let snapshot = EpisodeSnapshot {
            episode: self.cursor.completed_episodes(),
            episode_steps: self.cursor.episode_steps(),
            initial_balance: account.initial_balance(),
            balance: account.balance(),
            max_balance: account.max_balance(),
            position,
        };
        compute_report(&snapshot, self.portfolio.trades())
    }

    /// Emits the human-readable report as an `info` event.
    pub fn log_report(&self) {
        tracing::info!("\n{}", self.report());
    }

    /// Observation at the current cursor.
    #[must_use]
    pub fn observation(&self) -> Observation {
        let step = self.cursor.step();
        let mut obs = [0.0; OBSERVATION_SIZE];
        if let Some(row) = self.data.feature(step) {
            obs[..FEATURE_COUNT].copy_from_slice(row);
        }

        let price = self.data.prices().close()[step];
        let initial = self.portfolio.account().initial_balance();
        obs[FEATURE_COUNT] = (self.portfolio.unrealized_pnl(price) / initial).clamp(-1.0, 1.0);
        obs
    }

    /// Current row in the feature matrix.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.cursor.step()
    }

    /// Steps taken since the last reset.
    #[must_use]
    pub fn episode_steps(&self) -> usize {
        self.cursor.episode_steps()
    }

    /// Number of resets so far.
    #[must_use]
    pub fn completed_episodes(&self) -> u64 {
        self.cursor.completed_episodes()
    }

    /// `true` once the current episode terminated.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cursor.is_finished()
    }

    /// Account, ledger, and sizing state.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Prepared feature matrix and aligned prices.
    #[must_use]
    pub fn market_data(&self) -> &MarketData {
        &self.data
    }

    /// Environment configuration.
    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|dur| u64::try_from(dur.as_nanos()).ok())
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pipgym_types::{FeatureVector, PriceSeries};

    fn flat_data(closes: &[f64]) -> MarketData {
        let len = closes.len();
        let prices = PriceSeries::new(
            (0..len as i64).collect(),
            closes.to_vec(),
            closes.to_vec(),
            closes.to_vec(),
            vec![0.0; len],
            vec![0.001; len],
        )
        .unwrap();
        let features: Vec<FeatureVector> = (0..len).map(|i| [i as f64 * 0.01; FEATURE_COUNT]).collect();
        MarketData::new(features, prices).unwrap()
    }

    fn env(closes: &[f64]) -> TradingEnv {
        let config = EnvConfig {
            rng_seed: Some(7),
            ..EnvConfig::default()
        };
        TradingEnv::from_market_data(flat_data(closes), config).unwrap()
    }

    #[test]
    fn test_rejects_single_row() {
        let err = TradingEnv::from_market_data(flat_data(&[1.0]), EnvConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EnvError::Indicator(IndicatorError::InsufficientData { required: 2, available: 1 })
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EnvConfig::default();
        config.account.initial_balance = -1.0;
        let err = TradingEnv::from_market_data(flat_data(&[1.0, 1.0]), config).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_hold_reward_is_zero() {
        let mut env = env(&[1.0, 1.1, 1.2]);
        env.reset(None, ResetOptions::default());

        let outcome = env.step(Action::Hold).unwrap();
        assert_relative_eq!(outcome.reward, 0.0);
        assert_eq!(outcome.info.step, 1);
        assert!(!outcome.terminated);
        assert_relative_eq!(outcome.observation[0], 0.01);
    }

    #[test]
    fn test_observation_tracks_unrealized_pnl() {
        let mut env = env(&[100.0, 100.0, 300.0, 300.0]);
        env.reset(None, ResetOptions::default());

        env.step(Action::Buy).unwrap();
        let outcome = env.step(Action::Hold).unwrap();
        // 10 lots * 200 points = 2000 on a 10k account
        assert_relative_eq!(outcome.observation[FEATURE_COUNT], 0.2, epsilon = 1e-12);
        assert_relative_eq!(outcome.reward, 0.0);
    }

    #[test]
    fn test_report_includes_open_position() {
        let mut env = env(&[1.0, 1.0, 1.5, 1.5]);
        env.reset(None, ResetOptions::default());
        env.step(Action::Buy).unwrap();
        env.step(Action::Hold).unwrap();

        let report = env.report();
        let position = report.position.unwrap();
        assert_eq!(report.episode, 1);
        assert_eq!(report.episode_steps, 2);
        assert_eq!(position.hold_time, 1);
        assert_relative_eq!(position.unrealized_pnl, 5.0, epsilon = 1e-9);
        assert!(report.trades.is_none());
    }

    #[test]
    fn test_env_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<TradingEnv>();
    }
}
