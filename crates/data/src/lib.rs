//! pipgym Data
//!
//! CSV/Parquet bar loading and bar table validation.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Data-layer error types.
pub mod error;
/// CSV and Parquet bar loaders.
pub mod loader;
/// Bar table validation helpers.
pub mod validation;

/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: resolved table column layout.
pub use loader::ColumnLayout;
/// Re-export: load and validate a bar table by extension.
pub use loader::load_and_validate;
/// Re-export: load bars from CSV.
pub use loader::load_bars_csv;
/// Re-export: load bars from Parquet.
pub use loader::load_bars_parquet;
/// Re-export: timestamp cell parser.
pub use loader::parse_timestamp_ns;
/// Re-export: read bars from any CSV source.
pub use loader::read_bars_csv;
/// Re-export: bar validation.
pub use validation::{validate_bars, validate_timestamps};
