//! CSV price loading.
//!
//! The network market-data provider is an external collaborator; the
//! offline interchange format is a CSV with the header
//! `date,open,high,low,close,volume` and ISO dates. Rows must already be
//! deduplicated and time-sorted — validation failures surface as errors,
//! never as silent truncation.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use driftlab_core::{Bar, InputError, PriceSeries};

/// Errors from the CSV loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    BadDate { row: usize, value: String },

    #[error("invalid price data: {0}")]
    Input(#[from] InputError),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Load a PriceSeries from a CSV file.
pub fn load_csv(path: &Path) -> Result<PriceSeries, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();
    for (i, record) in reader.deserialize::<CsvRow>().enumerate() {
        let row = record?;
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|_| {
            LoadError::BadDate {
                // +2: one for the header line, one for 1-based counting.
                row: i + 2,
                value: row.date.clone(),
            }
        })?;
        bars.push(Bar {
            date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }
    Ok(PriceSeries::new(bars)?)
}
