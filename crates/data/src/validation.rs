//! Bar table validation helpers.

use crate::error::DataError;
use pipgym_types::Bar;

/// Validates a sequence of bars.
///
/// # Errors
/// - [`DataError::EmptyData`] when `bars` is empty.
/// - [`DataError::CorruptData`] on non-finite values, negative spread or
///   volume, inconsistent OHLC, or non-increasing timestamps.
pub fn validate_bars(bars: &[Bar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    for (i, bar) in bars.iter().enumerate() {
        if !bar.open.is_finite()
            || !bar.high.is_finite()
            || !bar.low.is_finite()
            || !bar.close.is_finite()
            || !bar.spread.is_finite()
            || !bar.volume.is_finite()
        {
            return Err(DataError::CorruptData(format!(
                "NaN/Inf at index {i}: {bar:?}"
            )));
        }

        if bar.spread < 0.0 {
            return Err(DataError::CorruptData(format!(
                "Negative spread at index {i}: {}",
                bar.spread
            )));
        }

        if bar.volume < 0.0 {
            return Err(DataError::CorruptData(format!(
                "Negative volume at index {i}: {}",
                bar.volume
            )));
        }

        if bar.low > bar.open
            || bar.low > bar.close
            || bar.high < bar.open
            || bar.high < bar.close
            || bar.low > bar.high
        {
            return Err(DataError::CorruptData(format!(
                "Invalid OHLC at index {i}: low={}, high={}, open={}, close={}",
                bar.low, bar.high, bar.open, bar.close
            )));
        }

        if i > 0 && bar.timestamp_ns <= bars[i - 1].timestamp_ns {
            return Err(DataError::CorruptData(format!(
                "Non-monotonic timestamp at index {i}: {} <= {}",
                bar.timestamp_ns,
                bars[i - 1].timestamp_ns
            )));
        }
    }

    Ok(())
}

/// Checks only that timestamps strictly increase.
///
/// Used where undefined or inconsistent price cells are tolerated because
/// the feature build drops the affected rows.
///
/// # Errors
/// [`DataError::CorruptData`] at the first non-increasing timestamp.
pub fn validate_timestamps(bars: &[Bar]) -> Result<(), DataError> {
    match bars
        .windows(2)
        .position(|pair| pair[1].timestamp_ns <= pair[0].timestamp_ns)
    {
        Some(i) => Err(DataError::CorruptData(format!(
            "Non-monotonic timestamp at index {}: {} <= {}",
            i + 1,
            bars[i + 1].timestamp_ns,
            bars[i].timestamp_ns
        ))),
        None => Ok(()),
    }
}
