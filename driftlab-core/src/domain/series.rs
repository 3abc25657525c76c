//! PriceSeries — a validated, immutable sequence of daily bars.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::InputError;

/// Ordered, validated price history for a single asset.
///
/// Invariants enforced at construction:
/// - non-empty
/// - strictly increasing dates (no duplicates)
/// - every bar passes the OHLC sanity check
///
/// Missing trading days are simply absent rows; the engine never zero-fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, InputError> {
        if bars.is_empty() {
            return Err(InputError::EmptySeries);
        }
        for (i, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(InputError::InsaneBar { index: i });
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(InputError::NonMonotonicDates { index: i });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Bar dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Simple close-to-close returns, aligned to the bar index.
    ///
    /// The first bar has no prior close, so `returns[0] == 0.0`.
    pub fn asset_returns(&self) -> Vec<f64> {
        let mut returns = vec![0.0; self.bars.len()];
        for i in 1..self.bars.len() {
            returns[i] = self.bars[i].close / self.bars[i - 1].close - 1.0;
        }
        returns
    }
}
