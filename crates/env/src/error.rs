//! Environment error types.

use pipgym_types::CoreError;
use thiserror::Error;

/// Errors that can occur while building or driving a trading environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// JSON/YAML config parse error
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Result serialization error
    #[error("result serialization error: {0}")]
    ResultSerialize(String),

    /// Data loading or validation error
    #[error("data error: {0}")]
    Data(#[from] pipgym_data::DataError),

    /// Feature pipeline error
    #[error("indicator error: {0}")]
    Indicator(#[from] pipgym_indicators::IndicatorError),

    /// Action index outside the discrete action space
    #[error("invalid action: {0} (expected 0..=3)")]
    InvalidAction(i64),

    /// `step` called after the episode terminated
    #[error("episode finished: call reset before stepping again")]
    EpisodeFinished,

    /// Runtime error
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl EnvError {
    /// Returns true if this is a config parse/validation error or a
    /// bar table with the wrong layout.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        match self {
            EnvError::ConfigParse(_) | EnvError::ConfigValidation(_) => true,
            EnvError::Data(err) => err.is_config_error(),
            _ => false,
        }
    }

    /// Returns the error category.
    /// Categories: `config`, `market_data`, `action`, `runtime`
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            EnvError::ConfigParse(_) | EnvError::ConfigValidation(_) => "config",

            EnvError::Data(_) | EnvError::Indicator(_) => "market_data",

            EnvError::InvalidAction(_) | EnvError::EpisodeFinished => "action",

            EnvError::ResultSerialize(_) | EnvError::Runtime(_) => "runtime",
        }
    }
}

impl From<CoreError> for EnvError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config(msg) => EnvError::ConfigValidation(msg),
            CoreError::InvalidAction(value) => EnvError::InvalidAction(value),
            CoreError::Json(_) | CoreError::Yaml(_) | CoreError::Io(_) => {
                EnvError::ConfigParse(err.to_string())
            }
            CoreError::Data(msg) => EnvError::Runtime(msg),
        }
    }
}
