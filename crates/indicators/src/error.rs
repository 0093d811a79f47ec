//! Indicator error types.

use pipgym_types::CoreError;
use thiserror::Error;

/// Errors that can occur while building the feature matrix.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// Invalid parameters for the pipeline
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Too few rows survive warm-up trimming
    #[error("insufficient data after preprocessing: {available} bars, need at least {required}")]
    InsufficientData {
        /// Required number of rows.
        required: usize,
        /// Rows left after trimming.
        available: usize,
    },

    /// Feature and price rows could not be aligned
    #[error("series alignment: {0}")]
    Alignment(#[from] CoreError),
}

impl IndicatorError {
    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidParams(msg.into())
    }
}
