//! Data-layer error types.

use thiserror::Error;

/// Errors that can occur while loading or validating bar tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required file was not found on disk.
    #[error("File not found: {0} ({1})")]
    FileNotFound(String, String),

    /// CSV or Parquet parsing failed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A required column is missing (configuration error).
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column has an unexpected data type.
    #[error("Invalid column type: {0}")]
    InvalidColumnType(String),

    /// No rows were loaded after reading data.
    #[error("Empty data")]
    EmptyData,

    /// Data violated a validation rule.
    #[error("Corrupt data: {0}")]
    CorruptData(String),
}

impl DataError {
    /// Returns true when the table layout itself is wrong (missing or mistyped columns).
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DataError::MissingColumn(_) | DataError::InvalidColumnType(_)
        )
    }
}
