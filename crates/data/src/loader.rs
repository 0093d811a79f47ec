use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, Float64Array, Int64Array, TimestampNanosecondArray};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::DataError;
use crate::validation::validate_bars;
use pipgym_types::{Bar, DEFAULT_VOLUME};

const REQUIRED_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "spread"];
const TIME_COLUMNS: [&str; 4] = ["time", "timestamp", "datetime", "date"];
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

/// Column positions resolved from a table header (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Timestamp column, if any
    pub time: Option<usize>,
    /// Open column
    pub open: usize,
    /// High column
    pub high: usize,
    /// Low column
    pub low: usize,
    /// Close column
    pub close: usize,
    /// Spread column
    pub spread: usize,
    /// Volume column, if any
    pub volume: Option<usize>,
}

impl ColumnLayout {
    /// Resolves column positions from header names.
    ///
    /// # Errors
    /// [`DataError::MissingColumn`] listing every required column that is absent.
    pub fn resolve<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, DataError> {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_ascii_lowercase())
            .collect();
        let find = |wanted: &str| names.iter().position(|n| n == wanted);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| find(*c).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::MissingColumn(missing.join(", ")));
        }

        let required = |wanted: &str| {
            find(wanted).ok_or_else(|| DataError::MissingColumn(wanted.to_string()))
        };

        Ok(Self {
            time: TIME_COLUMNS.iter().find_map(|c| find(*c)),
            open: required("open")?,
            high: required("high")?,
            low: required("low")?,
            close: required("close")?,
            spread: required("spread")?,
            volume: find("volume"),
        })
    }
}

/// Loads bars from a CSV file with a header row.
///
/// Required columns: `open`, `high`, `low`, `close`, `spread`. Optional:
/// a time column (`time`/`timestamp`/`datetime`/`date`) and `volume`.
/// Without a time column the row index is used; without volume every bar
/// gets volume 1.0.
///
/// # Errors
/// File, parse, and missing-column errors.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>, DataError> {
    let file = File::open(path)
        .map_err(|e| DataError::FileNotFound(path.display().to_string(), e.to_string()))?;
    read_bars_csv(file)
}

/// Reads bars from any CSV source. See [`load_bars_csv`].
///
/// # Errors
/// Parse and missing-column errors.
pub fn read_bars_csv<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DataError::ParseError(e.to_string()))?
        .clone();
    let layout = ColumnLayout::resolve(headers.iter())?;
    warn_on_optional_columns(&layout);

    let mut bars = Vec::new();
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| DataError::ParseError(e.to_string()))?;
        let field = |idx: usize| -> Result<&str, DataError> {
            record.get(idx).ok_or_else(|| {
                DataError::ParseError(format!("row {row_idx}: missing field {idx}"))
            })
        };
        let number = |idx: usize| -> Result<f64, DataError> {
            let raw = field(idx)?;
            raw.parse::<f64>().map_err(|_| {
                DataError::ParseError(format!(
                    "row {row_idx}: column '{}' is not numeric: {raw:?}",
                    &headers[idx]
                ))
            })
        };

        let timestamp_ns = match layout.time {
            Some(idx) => parse_timestamp_ns(field(idx)?)
                .ok_or_else(|| DataError::ParseError(format!("row {row_idx}: bad timestamp")))?,
            None => row_index_timestamp(row_idx),
        };

        bars.push(Bar {
            timestamp_ns,
            open: number(layout.open)?,
            high: number(layout.high)?,
            low: number(layout.low)?,
            close: number(layout.close)?,
            spread: number(layout.spread)?,
            volume: match layout.volume {
                Some(idx) => number(idx)?,
                None => DEFAULT_VOLUME,
            },
        });
    }

    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    Ok(bars)
}

/// Loads bars from a Parquet file. Column naming follows [`load_bars_csv`];
/// the time column may be a nanosecond timestamp or an `Int64` epoch.
///
/// # Errors
/// File, decode, column-type, and missing-column errors.
pub fn load_bars_parquet(path: &Path) -> Result<Vec<Bar>, DataError> {
    let file = File::open(path)
        .map_err(|e| DataError::FileNotFound(path.display().to_string(), e.to_string()))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::ParseError(e.to_string()))?;
    let layout = ColumnLayout::resolve(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str()),
    )?;
    warn_on_optional_columns(&layout);

    let reader = builder
        .build()
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut bars = Vec::new();
    let mut processed_rows = 0usize;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| DataError::ParseError(e.to_string()))?;

        let time = layout
            .time
            .map(|idx| TimeAccessor::from_column(&batch, idx))
            .transpose()?;
        let open = NumericAccessor::from_column(&batch, layout.open)?;
        let high = NumericAccessor::from_column(&batch, layout.high)?;
        let low = NumericAccessor::from_column(&batch, layout.low)?;
        let close = NumericAccessor::from_column(&batch, layout.close)?;
        let spread = NumericAccessor::from_column(&batch, layout.spread)?;
        let volume = layout
            .volume
            .map(|idx| NumericAccessor::from_column(&batch, idx))
            .transpose()?;

        for row_idx in 0..batch.num_rows() {
            let timestamp_ns = match &time {
                Some(accessor) => accessor.value(row_idx),
                None => row_index_timestamp(processed_rows + row_idx),
            };
            bars.push(Bar {
                timestamp_ns,
                open: open.value(row_idx),
                high: high.value(row_idx),
                low: low.value(row_idx),
                close: close.value(row_idx),
                spread: spread.value(row_idx),
                volume: volume.as_ref().map_or(DEFAULT_VOLUME, |v| v.value(row_idx)),
            });
        }

        processed_rows += batch.num_rows();
    }

    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    Ok(bars)
}

/// Loads a bar table by extension (`.csv` or `.parquet`) and validates it.
///
/// # Errors
/// Loader errors, unsupported extensions, and validation failures.
pub fn load_and_validate(path: &Path) -> Result<Vec<Bar>, DataError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let bars = match extension.as_deref() {
        Some("csv") => load_bars_csv(path)?,
        Some("parquet" | "pq") => load_bars_parquet(path)?,
        other => {
            return Err(DataError::ParseError(format!(
                "unsupported bar table extension: {other:?}"
            )));
        }
    };

    validate_bars(&bars)?;
    tracing::info!("Loaded {} bars from {}", bars.len(), path.display());
    Ok(bars)
}

/// Parses a timestamp cell into epoch nanoseconds.
///
/// Integers are read as epoch seconds, milliseconds, microseconds, or
/// nanoseconds depending on magnitude. Text accepts RFC 3339 and the
/// common naive `date time` layouts (interpreted as UTC).
#[must_use]
pub fn parse_timestamp_ns(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        let magnitude = value.unsigned_abs();
        return match magnitude {
            m if m < 100_000_000_000 => value.checked_mul(1_000_000_000),
            m if m < 100_000_000_000_000 => value.checked_mul(1_000_000),
            m if m < 100_000_000_000_000_000 => value.checked_mul(1_000),
            _ => Some(value),
        };
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_nanos_opt();
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt)
            .ok()
            .and_then(|dt| dt.and_utc().timestamp_nanos_opt())
    })
}

fn row_index_timestamp(row_idx: usize) -> i64 {
    i64::try_from(row_idx).unwrap_or(i64::MAX)
}

fn warn_on_optional_columns(layout: &ColumnLayout) {
    if layout.volume.is_none() {
        tracing::warn!("'volume' column not found, using synthetic volume {DEFAULT_VOLUME}");
    }
    if layout.time.is_none() {
        tracing::warn!("no time column found, using row index as timestamp");
    }
}

enum NumericAccessor<'a> {
    F64(&'a Float64Array),
    I64(&'a Int64Array),
}

impl<'a> NumericAccessor<'a> {
    fn from_column(batch: &'a RecordBatch, idx: usize) -> Result<Self, DataError> {
        let col = batch.column(idx);
        let name = batch.schema().field(idx).name().clone();

        if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
            Ok(NumericAccessor::F64(arr))
        } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
            Ok(NumericAccessor::I64(arr))
        } else {
            Err(DataError::InvalidColumnType(name))
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(&self, idx: usize) -> f64 {
        match self {
            NumericAccessor::F64(arr) if arr.is_null(idx) => f64::NAN,
            NumericAccessor::F64(arr) => arr.value(idx),
            NumericAccessor::I64(arr) if arr.is_null(idx) => f64::NAN,
            NumericAccessor::I64(arr) => arr.value(idx) as f64,
        }
    }
}

enum TimeAccessor<'a> {
    Nanos(&'a TimestampNanosecondArray),
    Epoch(&'a Int64Array),
}

impl<'a> TimeAccessor<'a> {
    fn from_column(batch: &'a RecordBatch, idx: usize) -> Result<Self, DataError> {
        let col = batch.column(idx);
        let name = batch.schema().field(idx).name().clone();

        if let Some(arr) = col.as_any().downcast_ref::<TimestampNanosecondArray>() {
            Ok(TimeAccessor::Nanos(arr))
        } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
            Ok(TimeAccessor::Epoch(arr))
        } else {
            Err(DataError::InvalidColumnType(name))
        }
    }

    fn value(&self, idx: usize) -> i64 {
        match self {
            TimeAccessor::Nanos(arr) => arr.value(idx),
            TimeAccessor::Epoch(arr) => arr.value(idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_case_insensitive() {
        let layout =
            ColumnLayout::resolve(["Time", "Open", "HIGH", "low", "Close", "Spread"]).unwrap();
        assert_eq!(layout.time, Some(0));
        assert_eq!(layout.spread, 5);
        assert_eq!(layout.volume, None);
    }

    #[test]
    fn test_layout_reports_all_missing_columns() {
        let err = ColumnLayout::resolve(["time", "open", "high", "close"]).unwrap_err();
        match err {
            DataError::MissingColumn(cols) => assert_eq!(cols, "low, spread"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = 1_704_067_200_000_000_000_i64; // 2024-01-01 00:00:00 UTC
        assert_eq!(parse_timestamp_ns("1704067200"), Some(expected));
        assert_eq!(parse_timestamp_ns("1704067200000"), Some(expected));
        assert_eq!(parse_timestamp_ns("1704067200000000000"), Some(expected));
        assert_eq!(parse_timestamp_ns("2024-01-01 00:00:00"), Some(expected));
        assert_eq!(parse_timestamp_ns("2024.01.01 00:00"), Some(expected));
        assert_eq!(parse_timestamp_ns("2024-01-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp_ns("yesterday"), None);
    }
}
