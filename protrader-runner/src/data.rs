//! Market data acquisition: CSV files and deterministic synthetic series.
//!
//! The CSV format is `timestamp,open,high,low,close,volume` with ISO dates.
//! The synthetic generator is a seeded random walk; the same seed always
//! produces the same series, so fingerprints and regression tests stay
//! stable.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use protrader_core::domain::{PriceBar, PriceSeries};
use protrader_core::error::SeriesError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors from the data layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unparseable timestamp `{value}`")]
    BadTimestamp { row: usize, value: String },

    #[error("series error: {0}")]
    Series(#[from] SeriesError),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn parse_timestamp(value: &str, row: usize) -> Result<NaiveDateTime, DataError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    Err(DataError::BadTimestamp {
        row,
        value: value.to_string(),
    })
}

/// Load a price series from a CSV file.
///
/// Series-level validation (ordering, bar sanity) is delegated to
/// `PriceSeries::new`; a bad row fails the whole load.
pub fn load_csv(path: impl AsRef<Path>, symbol: &str) -> Result<PriceSeries, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();
    for (row, record) in reader.deserialize::<CsvRow>().enumerate() {
        let record = record?;
        bars.push(PriceBar {
            timestamp: parse_timestamp(&record.timestamp, row)?,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }
    Ok(PriceSeries::new(symbol, bars)?)
}

/// Deterministic synthetic daily series: a seeded random walk with sane
/// OHLC geometry and variable volume.
pub fn synthetic_series(symbol: &str, bars: usize, seed: u64) -> PriceSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut price: f64 = rng.gen_range(100.0..200.0);
    let mut out = Vec::with_capacity(bars);
    for i in 0..bars {
        let open = price;
        let change: f64 = rng.gen_range(-0.02..0.02);
        let close = (open * (1.0 + change)).max(1.0);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.015));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.015));
        let volume = rng.gen_range(500_000.0..5_000_000.0);
        out.push(PriceBar {
            timestamp: base + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        });
        price = close;
    }
    PriceSeries::new(symbol, out).expect("generated bars are valid by construction")
}
