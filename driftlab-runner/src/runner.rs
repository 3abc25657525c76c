//! Strategy runner — wires indicators, signals, backtest, and risk together
//! for a single parameter tuple.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use driftlab_core::{
    compute_indicators, generate_signals, run_backtest, BacktestOutput, InputError, PriceSeries,
};

use crate::config::StrategyParams;
use crate::metrics::{compute_risk, RiskReport};

/// Errors from a single strategy run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("input error: {0}")]
    Input(#[from] InputError),
}

/// Complete result of one parameter tuple: backtest output plus risk
/// reports for the strategy and the buy-and-hold baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRun {
    pub params: StrategyParams,
    /// Content-addressed ID of `params` (see `StrategyParams::run_id`).
    pub run_id: String,
    pub signal_count: usize,
    pub backtest: BacktestOutput,
    pub strategy_report: RiskReport,
    pub baseline_report: RiskReport,
}

/// Run the full pipeline once: indicators → signals → backtest → risk.
pub fn run_strategy(
    prices: &PriceSeries,
    params: &StrategyParams,
) -> Result<StrategyRun, RunError> {
    let indicators = compute_indicators(prices, params.window)?;
    let signals = generate_signals(&indicators, params.threshold);
    let backtest = run_backtest(prices, &signals, params.cooldown_days)?;
    let strategy_report = compute_risk(&backtest.strategy_equity)?;
    let baseline_report = compute_risk(&backtest.baseline_equity)?;

    Ok(StrategyRun {
        params: params.clone(),
        run_id: params.run_id(),
        signal_count: signals.count(),
        backtest,
        strategy_report,
        baseline_report,
    })
}
