//! Forward-return evaluation: does the signal actually precede weak returns?
//!
//! Buckets N-day forward returns by whether a bar carried a RiskOff signal
//! and compares both buckets to the unconditional baseline. Descriptive
//! statistics only — no hypothesis test is performed.

use serde::{Deserialize, Serialize};

use driftlab_core::{InputError, PriceSeries, SignalSeries};

/// Descriptive statistics of one forward-return bucket.
///
/// `mean`, `median`, and `std_dev` are `None` for an empty bucket so an
/// empty group can never contribute a phantom zero to a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardReturnStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
}

impl ForwardReturnStats {
    fn from_returns(mut returns: Vec<f64>) -> Self {
        let count = returns.len();
        if count == 0 {
            return Self {
                count,
                mean: None,
                median: None,
                std_dev: None,
            };
        }
        let mean = returns.iter().sum::<f64>() / count as f64;
        let variance =
            returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / count as f64;
        returns.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = if count % 2 == 1 {
            returns[count / 2]
        } else {
            (returns[count / 2 - 1] + returns[count / 2]) / 2.0
        };
        Self {
            count,
            mean: Some(mean),
            median: Some(median),
            std_dev: Some(variance.sqrt()),
        }
    }
}

/// Forward-return comparison of signal days, non-signal days, and all days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvaluation {
    pub horizon: usize,
    pub signal: ForwardReturnStats,
    pub non_signal: ForwardReturnStats,
    pub baseline: ForwardReturnStats,
}

/// Bucket `horizon`-day forward returns by signal state.
///
/// `fwd[t] = close[t+horizon] / close[t] - 1`; the final `horizon` bars have
/// no forward price and are dropped from every bucket.
pub fn evaluate_signal(
    prices: &PriceSeries,
    signals: &SignalSeries,
    horizon: usize,
) -> Result<SignalEvaluation, InputError> {
    if horizon == 0 {
        return Err(InputError::ZeroHorizon);
    }
    if prices.len() != signals.len() {
        return Err(InputError::LengthMismatch {
            prices: prices.len(),
            signals: signals.len(),
        });
    }

    let closes = prices.closes();
    let n = closes.len();
    let usable = n.saturating_sub(horizon);

    let mut on_signal = Vec::new();
    let mut off_signal = Vec::new();
    let mut all = Vec::with_capacity(usable);
    for t in 0..usable {
        let fwd = closes[t + horizon] / closes[t] - 1.0;
        if signals.is_risk_off(t) {
            on_signal.push(fwd);
        } else {
            off_signal.push(fwd);
        }
        all.push(fwd);
    }

    Ok(SignalEvaluation {
        horizon,
        signal: ForwardReturnStats::from_returns(on_signal),
        non_signal: ForwardReturnStats::from_returns(off_signal),
        baseline: ForwardReturnStats::from_returns(all),
    })
}
