//! DriftLab Core — domain types, rolling indicators, risk-off signals, cooldown backtest.
//!
//! This crate is a pure function library: every entry point takes borrowed
//! inputs and returns owned value objects. Nothing here performs I/O, holds
//! ambient state, or retains references to caller-owned data beyond the call.
//!
//! Pipeline: `PriceSeries` → [`indicators::compute_indicators`] →
//! [`signals::generate_signals`] → [`backtest::run_backtest`].

pub mod backtest;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod signals;

pub use backtest::{run_backtest, BacktestOutput, Position};
pub use domain::{Bar, EquityCurve, PriceSeries};
pub use error::InputError;
pub use indicators::{compute_indicators, IndicatorSeries};
pub use signals::{generate_signals, Signal, SignalSeries};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::{Bar, PriceSeries};
    use chrono::NaiveDate;

    pub(crate) const DEFAULT_EPSILON: f64 = 1e-9;

    /// Build consecutive-day bars from closes (open = close, ±1% high/low).
    pub(crate) fn make_bars(closes: &[f64]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: base + chrono::Duration::days(i as i64),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_000,
            })
            .collect()
    }

    pub(crate) fn make_series(closes: &[f64]) -> PriceSeries {
        PriceSeries::new(make_bars(closes)).unwrap()
    }

    pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
        assert!(
            (actual - expected).abs() < epsilon,
            "expected {expected}, got {actual}"
        );
    }
}
