//! Risk-off signal generation from indicator z-scores.

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSeries;

/// Per-bar signal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// No signal at this bar (including warm-up / undefined z-score bars).
    None,
    /// Price has deviated far enough from its rolling mean to exit to cash.
    RiskOff,
}

/// Signal flags, index-aligned with the originating IndicatorSeries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSeries {
    pub flags: Vec<Signal>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of RiskOff bars.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&s| s == Signal::RiskOff).count()
    }

    pub fn is_risk_off(&self, index: usize) -> bool {
        self.flags[index] == Signal::RiskOff
    }
}

/// Emit `RiskOff` wherever the z-score is defined and `|z| >= threshold`.
///
/// Magnitude-based: both stretches above and below the mean fire. Bars with
/// an undefined z-score (warm-up, flat window) yield `Signal::None` — never
/// an error. Pure function of its inputs.
pub fn generate_signals(indicators: &IndicatorSeries, threshold: f64) -> SignalSeries {
    let flags = indicators
        .z_score
        .iter()
        .map(|z| match z {
            Some(z) if z.abs() >= threshold => Signal::RiskOff,
            _ => Signal::None,
        })
        .collect();
    SignalSeries { flags }
}
