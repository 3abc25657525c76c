//! Cooldown backtest: risk-off strategy vs. buy-and-hold.
//!
//! The cooldown automaton is the only sequential part of the engine and is
//! expressed as a single forward scan with O(1) work per bar. Everything
//! downstream (returns, equities) is a straight map/fold over that scan.

use serde::{Deserialize, Serialize};

use crate::domain::{EquityCurve, PriceSeries};
use crate::error::InputError;
use crate::signals::SignalSeries;

/// Per-bar position state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Position {
    /// Invested in the asset.
    Long,
    /// Flat, waiting out a risk-off cooldown. `remaining` counts the bars
    /// left, including none of the current bar's decrement.
    Cooldown { remaining: usize },
}

impl Position {
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long)
    }
}

/// Everything a single backtest produces. All vectors share the PriceSeries
/// index and are owned — the input series can be dropped afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestOutput {
    pub positions: Vec<Position>,
    pub asset_returns: Vec<f64>,
    pub strategy_returns: Vec<f64>,
    pub strategy_equity: EquityCurve,
    pub baseline_equity: EquityCurve,
}

/// Simulate the cooldown-based risk-off strategy against buy-and-hold.
///
/// Automaton, evaluated once per bar:
/// 1. If in cooldown, decrement; at zero remaining, re-enter Long.
/// 2. If Long and this bar's signal is RiskOff, enter
///    `Cooldown(cooldown_days)`.
///
/// A RiskOff during an active cooldown neither extends nor resets it
/// (fixed-length cooldown). The initial state is Long.
///
/// The strategy return at bar t is the asset return if the *previous* bar's
/// position was Long, else zero — so the signal bar itself still earns the
/// asset return and flatness starts the next bar. The first bar's strategy
/// return is always zero.
pub fn run_backtest(
    prices: &PriceSeries,
    signals: &SignalSeries,
    cooldown_days: usize,
) -> Result<BacktestOutput, InputError> {
    if cooldown_days == 0 {
        return Err(InputError::ZeroCooldown);
    }
    if prices.len() != signals.len() {
        return Err(InputError::LengthMismatch {
            prices: prices.len(),
            signals: signals.len(),
        });
    }

    let n = prices.len();
    let mut positions = Vec::with_capacity(n);
    let mut state = Position::Long;
    for t in 0..n {
        if let Position::Cooldown { remaining } = state {
            state = if remaining <= 1 {
                Position::Long
            } else {
                Position::Cooldown {
                    remaining: remaining - 1,
                }
            };
        }
        if state.is_long() && signals.is_risk_off(t) {
            state = Position::Cooldown {
                remaining: cooldown_days,
            };
        }
        positions.push(state);
    }

    let asset_returns = prices.asset_returns();
    let mut strategy_returns = vec![0.0; n];
    for t in 1..n {
        if positions[t - 1].is_long() {
            strategy_returns[t] = asset_returns[t];
        }
    }

    let dates = prices.dates();
    let strategy_equity = EquityCurve::from_returns(dates.clone(), &strategy_returns);
    let baseline_equity = EquityCurve::from_returns(dates, &asset_returns);

    Ok(BacktestOutput {
        positions,
        asset_returns,
        strategy_returns,
        strategy_equity,
        baseline_equity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::Signal;
    use crate::test_support::{assert_approx, make_series};

    fn signals_from(flags: &[bool]) -> SignalSeries {
        SignalSeries {
            flags: flags
                .iter()
                .map(|&f| if f { Signal::RiskOff } else { Signal::None })
                .collect(),
        }
    }

    #[test]
    fn no_signals_tracks_baseline() {
        let prices = make_series(&[100.0, 102.0, 101.0, 105.0]);
        let signals = signals_from(&[false; 4]);
        let out = run_backtest(&prices, &signals, 3).unwrap();
        assert!(out.positions.iter().all(|p| p.is_long()));
        assert_eq!(out.strategy_equity, out.baseline_equity);
    }

    #[test]
    fn signal_bar_still_earns_return_flat_after() {
        let prices = make_series(&[100.0, 110.0, 121.0, 133.1, 146.41]);
        let signals = signals_from(&[false, true, false, false, false]);
        let out = run_backtest(&prices, &signals, 2).unwrap();

        // Signal at t=1: that bar's return is earned, t=2 and t=3 are flat,
        // back long at t=3 so t=4 earns again.
        assert_approx(out.strategy_returns[1], 0.1, 1e-12);
        assert_eq!(out.strategy_returns[2], 0.0);
        assert_eq!(out.strategy_returns[3], 0.0);
        assert_approx(out.strategy_returns[4], 0.1, 1e-12);

        assert_eq!(out.positions[1], Position::Cooldown { remaining: 2 });
        assert_eq!(out.positions[2], Position::Cooldown { remaining: 1 });
        assert_eq!(out.positions[3], Position::Long);
    }

    #[test]
    fn cooldown_does_not_retrigger() {
        let prices = make_series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        // Second signal lands inside the first cooldown and must be ignored.
        let signals = signals_from(&[false, true, true, false, false, false]);
        let out = run_backtest(&prices, &signals, 3).unwrap();
        assert_eq!(out.positions[1], Position::Cooldown { remaining: 3 });
        assert_eq!(out.positions[2], Position::Cooldown { remaining: 2 });
        assert_eq!(out.positions[3], Position::Cooldown { remaining: 1 });
        assert_eq!(out.positions[4], Position::Long);
    }

    #[test]
    fn signal_on_expiry_bar_rearms() {
        let prices = make_series(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        // Cooldown from t=1 expires at t=3; a signal on t=3 finds the state
        // Long again and starts a fresh cooldown.
        let signals = signals_from(&[false, true, false, true, false]);
        let out = run_backtest(&prices, &signals, 2).unwrap();
        assert_eq!(out.positions[3], Position::Cooldown { remaining: 2 });
        assert_eq!(out.positions[4], Position::Cooldown { remaining: 1 });
    }

    #[test]
    fn first_bar_strategy_return_is_zero() {
        let prices = make_series(&[100.0, 105.0]);
        let signals = signals_from(&[true, false]);
        let out = run_backtest(&prices, &signals, 1).unwrap();
        assert_eq!(out.strategy_returns[0], 0.0);
        assert_approx(out.strategy_equity.values[0], 1.0, 1e-12);
    }

    #[test]
    fn rejects_zero_cooldown() {
        let prices = make_series(&[100.0, 101.0]);
        let signals = signals_from(&[false, false]);
        assert_eq!(
            run_backtest(&prices, &signals, 0),
            Err(InputError::ZeroCooldown)
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        let prices = make_series(&[100.0, 101.0, 102.0]);
        let signals = signals_from(&[false, false]);
        assert_eq!(
            run_backtest(&prices, &signals, 2),
            Err(InputError::LengthMismatch {
                prices: 3,
                signals: 2
            })
        );
    }

    #[test]
    fn deterministic_across_calls() {
        let prices = make_series(&[100.0, 101.0, 99.0, 98.0, 100.0, 105.0]);
        let signals = signals_from(&[false, false, true, false, true, false]);
        let a = run_backtest(&prices, &signals, 2).unwrap();
        let b = run_backtest(&prices, &signals, 2).unwrap();
        assert_eq!(a, b);
    }
}
