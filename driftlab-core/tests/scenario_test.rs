//! End-to-end scenarios for the indicator → signal → backtest pipeline.

use chrono::NaiveDate;
use driftlab_core::{
    compute_indicators, generate_signals, run_backtest, Bar, Position, PriceSeries, Signal,
};

fn make_series(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
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
        .collect();
    PriceSeries::new(bars).unwrap()
}

#[test]
fn ten_bar_risk_off_scenario() {
    let prices = make_series(&[
        100.0, 101.0, 99.0, 98.0, 100.0, 105.0, 110.0, 108.0, 107.0, 106.0,
    ]);
    let indicators = compute_indicators(&prices, 3).unwrap();

    // Two-bar warm-up: nothing defined before index 2.
    for i in 0..2 {
        assert!(indicators.moving_average[i].is_none());
        assert!(indicators.z_score[i].is_none());
    }

    let signals = generate_signals(&indicators, 1.0);

    // First signal: index 2, where z = -1/sqrt(2/3) ≈ -1.22.
    let first = signals
        .flags
        .iter()
        .position(|&s| s == Signal::RiskOff)
        .unwrap();
    assert_eq!(first, 2);

    let out = run_backtest(&prices, &signals, 2).unwrap();

    // The signal bar itself still earns the asset return...
    assert!((out.strategy_returns[2] - (99.0 / 101.0 - 1.0)).abs() < 1e-12);
    // ...then the strategy is flat for exactly the two cooldown bars.
    assert_eq!(out.strategy_returns[3], 0.0);
    assert_eq!(out.strategy_returns[4], 0.0);
    assert_eq!(out.positions[2], Position::Cooldown { remaining: 2 });
    assert_eq!(out.positions[3], Position::Cooldown { remaining: 1 });

    // Equity froze at the index-2 value from bar 3 onward (the later signals
    // at indices 4, 6, 8 re-arm the cooldown before any bar is spent long).
    let frozen = out.strategy_equity.values[2];
    for t in 3..prices.len() {
        assert!((out.strategy_equity.values[t] - frozen).abs() < 1e-12);
    }
    assert!((frozen - 0.99).abs() < 1e-12);

    // The baseline kept compounding.
    assert!((out.baseline_equity.values[9] - 1.06).abs() < 1e-12);
}

#[test]
fn constant_series_never_fires() {
    let prices = make_series(&[100.0; 20]);
    let indicators = compute_indicators(&prices, 5).unwrap();
    assert!(indicators.z_score.iter().all(|z| z.is_none()));

    let signals = generate_signals(&indicators, 1.0);
    assert_eq!(signals.count(), 0);

    let out = run_backtest(&prices, &signals, 3).unwrap();
    assert!(out.positions.iter().all(|p| p.is_long()));
    for t in 0..20 {
        assert_eq!(out.strategy_equity.values[t], 1.0);
        assert_eq!(out.baseline_equity.values[t], 1.0);
    }
}

#[test]
fn pipeline_is_bit_identical_across_calls() {
    let prices = make_series(&[
        100.0, 103.0, 101.0, 97.0, 104.0, 108.0, 102.0, 99.0, 101.0, 107.0, 111.0, 109.0,
    ]);
    let run = || {
        let ind = compute_indicators(&prices, 4).unwrap();
        let sig = generate_signals(&ind, 1.2);
        run_backtest(&prices, &sig, 3).unwrap()
    };
    assert_eq!(run(), run());
}
