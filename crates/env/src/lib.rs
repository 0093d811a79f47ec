//! pipgym Env
//!
//! Single-instrument trading environment with a discrete action space:
//! reset/step episode control over a prepared feature matrix, position
//! bookkeeping, reward and termination, and episode reports.
//!
//! # Example
//!
//! ```no_run
//! use pipgym_env::{ResetOptions, TradingEnv};
//! use pipgym_types::{Action, EnvConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bars = pipgym_data::load_and_validate(std::path::Path::new("EURUSD_M15.csv"))?;
//! let mut env = TradingEnv::new(&bars, EnvConfig::default())?;
//!
//! let (_obs, _info) = env.reset(Some(42), ResetOptions::default());
//! loop {
//!     let outcome = env.step(Action::Hold)?;
//!     if outcome.terminated {
//!         break;
//!     }
//! }
//! env.log_report();
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod engine;
pub mod episode;
pub mod error;
pub mod runner;

pub use engine::TradingEnv;
pub use episode::{EpisodeCursor, ResetInfo, ResetOptions, StepInfo, StepOutcome};
pub use error::EnvError;
pub use runner::{EpisodeSummary, run_actions, run_actions_from_json, run_actions_from_yaml};
