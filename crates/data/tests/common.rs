#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;
use pipgym_types::Bar;

pub const BASE_TS_NS: i64 = 1_704_067_200_000_000_000; // 2024-01-01 00:00:00 UTC
pub const STEP_NS: i64 = 3_600_000_000_000; // 1h

pub fn sample_bars() -> Vec<Bar> {
    vec![
        Bar {
            timestamp_ns: BASE_TS_NS,
            open: 1.1000,
            high: 1.1050,
            low: 1.0980,
            close: 1.1020,
            spread: 12.0,
            volume: 100.0,
        },
        Bar {
            timestamp_ns: BASE_TS_NS + STEP_NS,
            open: 1.1020,
            high: 1.1060,
            low: 1.1000,
            close: 1.1040,
            spread: 10.0,
            volume: 120.0,
        },
        Bar {
            timestamp_ns: BASE_TS_NS + 2 * STEP_NS,
            open: 1.1040,
            high: 1.1045,
            low: 1.0990,
            close: 1.1000,
            spread: 15.0,
            volume: 90.0,
        },
    ]
}

pub fn write_bars_csv(path: &Path, bars: &[Bar]) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(path)?;
    writeln!(file, "time,open,high,low,close,spread,volume")?;
    for bar in bars {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            bar.timestamp_ns / 1_000_000_000,
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.spread,
            bar.volume
        )?;
    }
    Ok(())
}

pub fn write_bars_parquet(path: &Path, bars: &[Bar]) -> Result<(), Box<dyn std::error::Error>> {
    let fields = vec![
        Field::new(
            "time",
            DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
            false,
        ),
        Field::new("open", DataType::Float64, false),
        Field::new("high", DataType::Float64, false),
        Field::new("low", DataType::Float64, false),
        Field::new("close", DataType::Float64, false),
        Field::new("spread", DataType::Float64, false),
        Field::new("volume", DataType::Float64, false),
    ];

    let column = |f: fn(&Bar) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(bars.iter().map(f).collect::<Vec<_>>()))
    };
    let timestamps: Vec<i64> = bars.iter().map(|b| b.timestamp_ns).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(TimestampNanosecondArray::from(timestamps).with_timezone("UTC")),
        column(|b| b.open),
        column(|b| b.high),
        column(|b| b.low),
        column(|b| b.close),
        column(|b| b.spread),
        column(|b| b.volume),
    ];

    write_custom_parquet(path, fields, columns)
}

pub fn write_custom_parquet(
    path: &Path,
    fields: Vec<Field>,
    columns: Vec<ArrayRef>,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close().map(|_| ()).map_err(|e| e.into())
}
