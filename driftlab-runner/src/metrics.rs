//! Risk analytics — pure functions from an equity curve to statistics.
//!
//! Metrics whose denominator can vanish (Sharpe, Calmar) are `Option<f64>`:
//! an undefined ratio is reported as `None`, never as 0, NaN, or infinity,
//! so downstream aggregation cannot silently absorb it.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use driftlab_core::{EquityCurve, InputError};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Immutable risk snapshot of exactly one equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Worst peak-to-trough decline, in [-1, 0].
    pub max_drawdown: f64,
    /// Compounded return scaled to a 252-trading-day year.
    pub annualized_return: f64,
    /// Annualized Sharpe; `None` when daily returns have zero dispersion.
    pub sharpe: Option<f64>,
    /// Annualized return / |max drawdown|; `None` when drawdown is zero.
    pub calmar: Option<f64>,
    /// Compounded return per (year, month) bucket, in date order. Months
    /// with no bars are absent, not zero.
    pub monthly_returns: Vec<MonthlyReturn>,
}

/// Compounded return of one calendar month of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    pub year: i32,
    pub month: u32,
    pub value: f64,
}

/// Compute the full risk report for an equity curve.
pub fn compute_risk(curve: &EquityCurve) -> Result<RiskReport, InputError> {
    if curve.is_empty() {
        return Err(InputError::EmptySeries);
    }
    let max_dd = max_drawdown(&curve.values);
    let annualized = annualized_return(&curve.values);
    Ok(RiskReport {
        max_drawdown: max_dd,
        annualized_return: annualized,
        sharpe: sharpe_ratio(&curve.daily_returns()),
        calmar: calmar_ratio(annualized, max_dd),
        monthly_returns: monthly_returns(curve),
    })
}

/// Per-bar drawdown from the running maximum: `equity[t]/running_max[t] - 1`.
pub fn drawdown_profile(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::MIN;
    values
        .iter()
        .map(|&v| {
            if v > peak {
                peak = v;
            }
            if peak > 0.0 {
                v / peak - 1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Worst drawdown, a negative number or 0.
pub fn max_drawdown(values: &[f64]) -> f64 {
    drawdown_profile(values)
        .into_iter()
        .fold(0.0, f64::min)
}

/// Compounded total return scaled to a 252-day year over the curve's span.
///
/// For a span shorter than two bars the total return is returned unscaled.
pub fn annualized_return(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let total = values[values.len() - 1] / values[0] - 1.0;
    let years = (values.len() - 1) as f64 / TRADING_DAYS_PER_YEAR;
    if years <= 0.0 {
        return total;
    }
    (1.0 + total).powf(1.0 / years) - 1.0
}

/// Annualized Sharpe ratio: mean / std of daily returns × sqrt(252).
///
/// Population std. `None` for fewer than two returns or zero dispersion.
pub fn sharpe_ratio(daily_returns: &[f64]) -> Option<f64> {
    if daily_returns.len() < 2 {
        return None;
    }
    let mean = mean(daily_returns);
    let std = std_dev(daily_returns, mean);
    if std < 1e-15 {
        return None;
    }
    Some(mean / std * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Calmar ratio: annualized return / |max drawdown|. `None` when the curve
/// never drew down.
pub fn calmar_ratio(annualized_return: f64, max_drawdown: f64) -> Option<f64> {
    if max_drawdown == 0.0 {
        return None;
    }
    Some(annualized_return / max_drawdown.abs())
}

/// Compounded return per calendar month, in date order.
///
/// A month's return is measured against the last equity value of the prior
/// month (or the 1.0 start for the first bucket), so consecutive bucket
/// returns compound back to the curve's total return.
pub fn monthly_returns(curve: &EquityCurve) -> Vec<MonthlyReturn> {
    let mut out: Vec<MonthlyReturn> = Vec::new();
    let mut bucket_entry = 1.0;
    let mut current: Option<(i32, u32)> = None;

    for (date, &value) in curve.dates.iter().zip(&curve.values) {
        let key = (date.year(), date.month());
        match current {
            Some(k) if k == key => {
                let last = out.last_mut().unwrap();
                last.value = value / bucket_entry - 1.0;
            }
            _ => {
                if let Some(prev) = out.last() {
                    bucket_entry *= 1.0 + prev.value;
                }
                current = Some(key);
                out.push(MonthlyReturn {
                    year: key.0,
                    month: key.1,
                    value: value / bucket_entry - 1.0,
                });
            }
        }
    }
    out
}

// ─── Helpers ────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn curve_from_values(values: Vec<f64>) -> EquityCurve {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let dates = (0..values.len())
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect();
        EquityCurve { dates, values }
    }

    #[test]
    fn max_drawdown_known() {
        let values = vec![1.0, 1.1, 0.9, 0.95];
        let expected = 0.9 / 1.1 - 1.0;
        assert!((max_drawdown(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_monotonic_is_zero() {
        let values: Vec<f64> = (0..50).map(|i| 1.0 + i as f64 * 0.01).collect();
        assert_eq!(max_drawdown(&values), 0.0);
    }

    #[test]
    fn drawdown_bounded() {
        let values = vec![1.0, 2.0, 0.001, 1.5];
        for dd in drawdown_profile(&values) {
            assert!((-1.0..=0.0).contains(&dd));
        }
    }

    #[test]
    fn annualized_matches_one_year() {
        // 253 bars = 252 daily steps = exactly one trading year.
        let mut values = vec![1.0];
        let daily = (1.1_f64).powf(1.0 / 252.0);
        for i in 1..253 {
            values.push(values[i - 1] * daily);
        }
        assert!((annualized_return(&values) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn sharpe_none_for_constant_curve() {
        let values = vec![1.0; 100];
        let curve = curve_from_values(values);
        assert_eq!(sharpe_ratio(&curve.daily_returns()), None);
    }

    #[test]
    fn sharpe_none_for_single_bar() {
        let curve = curve_from_values(vec![1.0]);
        assert_eq!(sharpe_ratio(&curve.daily_returns()), None);
    }

    #[test]
    fn sharpe_positive_for_steadily_rising_noisy_curve() {
        let mut values = vec![1.0];
        for i in 1..200 {
            let r = if i % 2 == 0 { 0.002 } else { 0.0005 };
            values.push(values[i - 1] * (1.0 + r));
        }
        let curve = curve_from_values(values);
        let s = sharpe_ratio(&curve.daily_returns()).unwrap();
        assert!(s > 0.0);
    }

    #[test]
    fn calmar_none_without_drawdown() {
        assert_eq!(calmar_ratio(0.08, 0.0), None);
    }

    #[test]
    fn calmar_known_value() {
        let c = calmar_ratio(0.10, -0.25).unwrap();
        assert!((c - 0.4).abs() < 1e-12);
    }

    #[test]
    fn monthly_buckets_compound_to_total() {
        // Jan 30/31 and Feb 1/2: two buckets.
        let dates = vec![
            NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
        ];
        let curve = EquityCurve {
            dates,
            values: vec![1.0, 1.02, 1.05, 1.04],
        };
        let months = monthly_returns(&curve);
        assert_eq!(months.len(), 2);
        assert_eq!((months[0].year, months[0].month), (2024, 1));
        assert_eq!((months[1].year, months[1].month), (2024, 2));
        assert!((months[0].value - 0.02).abs() < 1e-12);
        assert!((months[1].value - (1.04 / 1.02 - 1.0)).abs() < 1e-12);

        let compounded: f64 = months.iter().map(|m| 1.0 + m.value).product();
        assert!((compounded - 1.04).abs() < 1e-12);
    }

    #[test]
    fn monthly_single_bucket() {
        let curve = curve_from_values(vec![1.0, 1.01, 1.03]);
        let months = monthly_returns(&curve);
        assert_eq!(months.len(), 1);
        assert!((months[0].value - 0.03).abs() < 1e-12);
    }

    #[test]
    fn compute_risk_rejects_empty() {
        let curve = EquityCurve {
            dates: vec![],
            values: vec![],
        };
        assert_eq!(compute_risk(&curve), Err(InputError::EmptySeries));
    }

    #[test]
    fn compute_risk_constant_curve_all_undefined_ratios() {
        let curve = curve_from_values(vec![1.0; 30]);
        let report = compute_risk(&curve).unwrap();
        assert_eq!(report.max_drawdown, 0.0);
        assert_eq!(report.annualized_return, 0.0);
        assert_eq!(report.sharpe, None);
        assert_eq!(report.calmar, None);
    }
}
