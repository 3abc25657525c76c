//! Parameter sweep: grid search over window × threshold × cooldown.
//!
//! Grid points are independent pure runs, so they execute on the rayon pool
//! with no shared mutable state; `par_iter().map().collect()` preserves the
//! grid's enumeration order. A grid point whose run fails (for example a
//! window longer than the series) yields a row with all-`None` metrics —
//! it never aborts the sweep.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

use driftlab_core::PriceSeries;

use crate::config::StrategyParams;
use crate::runner::{run_strategy, StrategyRun};

/// Parameter grid: the cross-product of the three strategy knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub windows: Vec<usize>,
    pub thresholds: Vec<f64>,
    pub cooldowns: Vec<usize>,
}

impl ParamGrid {
    /// Total number of grid points.
    pub fn size(&self) -> usize {
        self.windows.len() * self.thresholds.len() * self.cooldowns.len()
    }

    /// Reject individually-invalid values, all reported together — a grid
    /// never starts running with a bad axis in it.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let mut issues = Vec::new();
        if self.windows.is_empty() {
            issues.push("windows axis is empty".to_string());
        }
        if self.thresholds.is_empty() {
            issues.push("thresholds axis is empty".to_string());
        }
        if self.cooldowns.is_empty() {
            issues.push("cooldowns axis is empty".to_string());
        }
        for &w in &self.windows {
            if w == 0 {
                issues.push("window 0 is invalid (must be >= 1)".to_string());
            }
        }
        for &t in &self.thresholds {
            if !t.is_finite() || t <= 0.0 {
                issues.push(format!("threshold {t} is invalid (must be finite and > 0)"));
            }
        }
        for &c in &self.cooldowns {
            if c == 0 {
                issues.push("cooldown 0 is invalid (must be >= 1)".to_string());
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ParameterError { issues })
        }
    }

    /// All grid points in enumeration order: windows outer, thresholds
    /// middle, cooldowns inner.
    pub fn combinations(&self) -> Vec<StrategyParams> {
        let mut params = Vec::with_capacity(self.size());
        for &window in &self.windows {
            for &threshold in &self.thresholds {
                for &cooldown_days in &self.cooldowns {
                    params.push(StrategyParams {
                        window,
                        threshold,
                        cooldown_days,
                    });
                }
            }
        }
        params
    }
}

/// All individually-invalid grid values, reported in one error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sweep parameters: {}", issues.join("; "))]
pub struct ParameterError {
    pub issues: Vec<String>,
}

/// One row of the sweep table. Metric fields are `None` when the grid point
/// could not produce a defined value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub params: StrategyParams,
    pub signal_count: Option<usize>,
    pub strategy_return: Option<f64>,
    pub baseline_return: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub sharpe: Option<f64>,
    pub calmar: Option<f64>,
}

impl SweepRow {
    fn from_run(run: StrategyRun) -> Self {
        Self {
            signal_count: Some(run.signal_count),
            strategy_return: Some(run.backtest.strategy_equity.total_return()),
            baseline_return: Some(run.backtest.baseline_equity.total_return()),
            max_drawdown: Some(run.strategy_report.max_drawdown),
            sharpe: run.strategy_report.sharpe,
            calmar: run.strategy_report.calmar,
            params: run.params,
        }
    }

    fn undefined(params: StrategyParams) -> Self {
        Self {
            params,
            signal_count: None,
            strategy_return: None,
            baseline_return: None,
            max_drawdown: None,
            sharpe: None,
            calmar: None,
        }
    }

    /// Strategy return minus baseline return, when both are defined.
    pub fn excess_return(&self) -> Option<f64> {
        Some(self.strategy_return? - self.baseline_return?)
    }
}

/// Read-only sweep table: one row per grid point, in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    rows: Vec<SweepRow>,
}

impl SweepResult {
    pub fn rows(&self) -> &[SweepRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows sorted by Calmar descending. Stable: ties and undefined rows
    /// keep their enumeration order, undefined rows sort last.
    pub fn sorted_by_calmar(&self) -> Vec<&SweepRow> {
        let mut sorted: Vec<&SweepRow> = self.rows.iter().collect();
        sorted.sort_by(|a, b| match (a.calmar, b.calmar) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        sorted
    }

    /// Best defined row by Calmar, if any row has one.
    pub fn best_by_calmar(&self) -> Option<&SweepRow> {
        self.sorted_by_calmar()
            .into_iter()
            .find(|row| row.calmar.is_some())
    }
}

/// Run the full pipeline once per grid point, in parallel.
pub fn run_sweep(prices: &PriceSeries, grid: &ParamGrid) -> Result<SweepResult, ParameterError> {
    grid.validate()?;

    let rows: Vec<SweepRow> = grid
        .combinations()
        .into_par_iter()
        .map(|params| match run_strategy(prices, &params) {
            Ok(run) => SweepRow::from_run(run),
            Err(_) => SweepRow::undefined(params),
        })
        .collect();

    Ok(SweepResult { rows })
}
