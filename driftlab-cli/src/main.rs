//! DriftLab CLI — backtest, sweep, and evaluate commands.
//!
//! Commands:
//! - `backtest` — run one parameter tuple over a CSV and print the risk report
//! - `sweep` — grid-search windows × thresholds × cooldowns, print the table
//! - `evaluate` — compare forward returns on signal vs. non-signal days
//!
//! All commands read a local CSV (`date,open,high,low,close,volume`) and
//! accept `--json` for machine-readable output.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use driftlab_core::PriceSeries;
use driftlab_runner::{
    evaluate_signal, load_csv, run_strategy, run_sweep, AnalysisConfig, ForwardReturnStats,
    ParamGrid, StrategyParams, StrategyRun,
};

#[derive(Parser)]
#[command(
    name = "driftlab",
    about = "DriftLab CLI — mean-deviation risk-off strategy analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single backtest and print the risk report.
    Backtest {
        /// Path to a price CSV (date,open,high,low,close,volume).
        csv: PathBuf,

        /// Rolling window for the moving average and std, in bars.
        #[arg(long, default_value_t = 20)]
        window: usize,

        /// Z-score magnitude at or above which RiskOff fires.
        #[arg(long, default_value_t = 1.5)]
        threshold: f64,

        /// Bars spent flat after a RiskOff signal.
        #[arg(long, default_value_t = 5)]
        cooldown: usize,

        /// Emit the full result as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Grid-search strategy parameters and print one row per combination.
    Sweep {
        /// Path to a price CSV.
        csv: PathBuf,

        /// TOML config with a [grid] section; overrides the axis flags.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Windows to sweep.
        #[arg(long, value_delimiter = ',', default_value = "10,20,30")]
        windows: Vec<usize>,

        /// Thresholds to sweep.
        #[arg(long, value_delimiter = ',', default_value = "1.0,1.5,2.0")]
        thresholds: Vec<f64>,

        /// Cooldowns to sweep.
        #[arg(long, value_delimiter = ',', default_value = "3,5,10")]
        cooldowns: Vec<usize>,

        /// Sort rows by Calmar descending (undefined rows last).
        #[arg(long, default_value_t = false)]
        sort: bool,

        /// Emit the sweep table as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compare forward returns on signal vs. non-signal days.
    Evaluate {
        /// Path to a price CSV.
        csv: PathBuf,

        #[arg(long, default_value_t = 20)]
        window: usize,

        #[arg(long, default_value_t = 1.5)]
        threshold: f64,

        /// Forward-return horizon in bars.
        #[arg(long, default_value_t = 5)]
        horizon: usize,

        /// Emit the evaluation as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Backtest {
            csv,
            window,
            threshold,
            cooldown,
            json,
        } => cmd_backtest(&csv, window, threshold, cooldown, json),
        Commands::Sweep {
            csv,
            config,
            windows,
            thresholds,
            cooldowns,
            sort,
            json,
        } => cmd_sweep(&csv, config.as_deref(), windows, thresholds, cooldowns, sort, json),
        Commands::Evaluate {
            csv,
            window,
            threshold,
            horizon,
            json,
        } => cmd_evaluate(&csv, window, threshold, horizon, json),
    }
}

fn load_prices(csv: &Path) -> Result<PriceSeries> {
    load_csv(csv).with_context(|| format!("loading prices from {}", csv.display()))
}

fn cmd_backtest(
    csv: &Path,
    window: usize,
    threshold: f64,
    cooldown: usize,
    json: bool,
) -> Result<()> {
    let prices = load_prices(csv)?;
    let params = StrategyParams {
        window,
        threshold,
        cooldown_days: cooldown,
    };
    let run = run_strategy(&prices, &params).context("running backtest")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }
    print_run(&run);
    Ok(())
}

fn print_run(run: &StrategyRun) {
    println!(
        "run {}  (window={} threshold={} cooldown={})",
        &run.run_id[..12],
        run.params.window,
        run.params.threshold,
        run.params.cooldown_days
    );
    println!("bars: {}   risk-off signals: {}", run.backtest.strategy_equity.len(), run.signal_count);
    println!();
    println!(
        "{:<14} {:>12} {:>12} {:>10} {:>10} {:>10}",
        "portfolio", "total ret", "ann ret", "max dd", "sharpe", "calmar"
    );
    for (name, equity, report) in [
        (
            "strategy",
            &run.backtest.strategy_equity,
            &run.strategy_report,
        ),
        (
            "buy_hold",
            &run.backtest.baseline_equity,
            &run.baseline_report,
        ),
    ] {
        println!(
            "{:<14} {:>11.2}% {:>11.2}% {:>9.2}% {:>10} {:>10}",
            name,
            equity.total_return() * 100.0,
            report.annualized_return * 100.0,
            report.max_drawdown * 100.0,
            fmt_opt(report.sharpe, 2),
            fmt_opt(report.calmar, 2),
        );
    }

    if !run.strategy_report.monthly_returns.is_empty() {
        println!();
        println!("monthly strategy returns:");
        for m in &run.strategy_report.monthly_returns {
            println!("  {:>4}-{:02}  {:>8.2}%", m.year, m.month, m.value * 100.0);
        }
    }
}

fn cmd_sweep(
    csv: &Path,
    config: Option<&Path>,
    windows: Vec<usize>,
    thresholds: Vec<f64>,
    cooldowns: Vec<usize>,
    sort: bool,
    json: bool,
) -> Result<()> {
    let prices = load_prices(csv)?;
    let grid = match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = AnalysisConfig::from_toml_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?;
            match config.grid {
                Some(grid) => grid,
                None => bail!("config {} has no [grid] section", path.display()),
            }
        }
        None => ParamGrid {
            windows,
            thresholds,
            cooldowns,
        },
    };

    let result = run_sweep(&prices, &grid).context("running sweep")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{:>6} {:>9} {:>8} {:>7} {:>11} {:>11} {:>9} {:>8} {:>8}",
        "window", "threshold", "cooldown", "signals", "strat ret", "bh ret", "max dd", "sharpe", "calmar"
    );
    let rows: Vec<_> = if sort {
        result.sorted_by_calmar()
    } else {
        result.rows().iter().collect()
    };
    for row in rows {
        println!(
            "{:>6} {:>9} {:>8} {:>7} {:>11} {:>11} {:>9} {:>8} {:>8}",
            row.params.window,
            row.params.threshold,
            row.params.cooldown_days,
            match row.signal_count {
                Some(n) => n.to_string(),
                None => "n/a".to_string(),
            },
            fmt_opt_pct(row.strategy_return),
            fmt_opt_pct(row.baseline_return),
            fmt_opt_pct(row.max_drawdown),
            fmt_opt(row.sharpe, 2),
            fmt_opt(row.calmar, 2),
        );
    }
    println!("{} grid points", result.len());
    Ok(())
}

fn cmd_evaluate(
    csv: &Path,
    window: usize,
    threshold: f64,
    horizon: usize,
    json: bool,
) -> Result<()> {
    let prices = load_prices(csv)?;
    let indicators =
        driftlab_core::compute_indicators(&prices, window).context("computing indicators")?;
    let signals = driftlab_core::generate_signals(&indicators, threshold);
    let eval = evaluate_signal(&prices, &signals, horizon).context("evaluating signal")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
        return Ok(());
    }

    println!("forward horizon: {} bars", eval.horizon);
    println!(
        "{:<16} {:>7} {:>10} {:>10} {:>10}",
        "group", "count", "mean", "median", "std"
    );
    for (name, stats) in [
        ("signal_days", &eval.signal),
        ("non_signal_days", &eval.non_signal),
        ("all_days", &eval.baseline),
    ] {
        print_bucket(name, stats);
    }
    Ok(())
}

fn print_bucket(name: &str, stats: &ForwardReturnStats) {
    println!(
        "{:<16} {:>7} {:>10} {:>10} {:>10}",
        name,
        stats.count,
        fmt_opt_pct(stats.mean),
        fmt_opt_pct(stats.median),
        fmt_opt_pct(stats.std_dev),
    );
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

fn fmt_opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "n/a".to_string(),
    }
}
