//! EquityCurve — cumulative compounded return series starting at 1.0.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dated equity curve.
///
/// `values[0] == 1.0` by convention; dates share the originating
/// PriceSeries index. Owns its data — no borrows of caller series survive
/// the backtest call that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl EquityCurve {
    /// Compound a per-bar return series into an equity curve.
    pub fn from_returns(dates: Vec<NaiveDate>, returns: &[f64]) -> Self {
        debug_assert_eq!(dates.len(), returns.len());
        let mut values = Vec::with_capacity(returns.len());
        let mut equity = 1.0;
        for &r in returns {
            equity *= 1.0 + r;
            values.push(equity);
        }
        // First bar's return is always 0, so values[0] stays at 1.0.
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Terminal value relative to the 1.0 start, as a fractional return.
    pub fn total_return(&self) -> f64 {
        match self.values.last() {
            Some(&last) => last - 1.0,
            None => 0.0,
        }
    }

    /// Per-bar returns recovered from the curve (length `len() - 1`).
    pub fn daily_returns(&self) -> Vec<f64> {
        self.values
            .windows(2)
            .map(|w| if w[0] > 0.0 { w[1] / w[0] - 1.0 } else { 0.0 })
            .collect()
    }
}
