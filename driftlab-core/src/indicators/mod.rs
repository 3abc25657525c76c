//! Rolling indicators: moving average, deviation from it, and z-score.
//!
//! One pass over the closes with a running sum and sum-of-squares — O(n)
//! total, never O(n·window). Warm-up bars and zero-std bars are `None`,
//! never a silent zero. Standard deviation is population (divide by N).

use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::error::InputError;

/// Guard against a flat window whose variance rounds to a denormal instead
/// of exactly zero.
const MIN_STD: f64 = 1e-12;

/// Per-bar indicator values, index-aligned with the originating PriceSeries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub window: usize,
    pub moving_average: Vec<Option<f64>>,
    pub deviation: Vec<Option<f64>>,
    pub z_score: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.z_score.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_score.is_empty()
    }
}

/// Compute rolling mean, deviation, and z-score of closes over `window` bars.
///
/// - `moving_average[t]` = mean of `close[t-window+1 ..= t]`; `None` for
///   `t < window - 1`.
/// - `deviation[t]` = `close[t] - moving_average[t]`.
/// - `z_score[t]` = `deviation[t] / rolling_std[t]`; `None` where the window
///   is flat (zero std) — a flat price has no defined z-score.
pub fn compute_indicators(
    prices: &PriceSeries,
    window: usize,
) -> Result<IndicatorSeries, InputError> {
    if window == 0 {
        return Err(InputError::ZeroWindow);
    }
    let closes = prices.closes();
    let n = closes.len();
    if window > n {
        return Err(InputError::WindowExceedsData { window, len: n });
    }

    let mut moving_average = vec![None; n];
    let mut deviation = vec![None; n];
    let mut z_score = vec![None; n];

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for (i, &close) in closes.iter().enumerate() {
        sum += close;
        sum_sq += close * close;
        if i + 1 < window {
            continue;
        }
        if i >= window {
            let leaving = closes[i - window];
            sum -= leaving;
            sum_sq -= leaving * leaving;
        }

        let w = window as f64;
        let mean = sum / w;
        // Rolling subtraction can leave a tiny negative residual; clamp.
        let variance = (sum_sq / w - mean * mean).max(0.0);
        let std = variance.sqrt();

        let dev = close - mean;
        moving_average[i] = Some(mean);
        deviation[i] = Some(dev);
        if std >= MIN_STD {
            z_score[i] = Some(dev / std);
        }
    }

    Ok(IndicatorSeries {
        window,
        moving_average,
        deviation,
        z_score,
    })
}
