//! DriftLab Runner — risk analytics, signal evaluation, parameter sweeps.
//!
//! Builds on `driftlab-core` to provide:
//! - Risk analytics: drawdown profile, Sharpe, Calmar, monthly return buckets
//! - Forward-return evaluation of signal vs. non-signal days
//! - Validated parameter grids swept in parallel with rayon
//! - A single-run strategy pipeline with content-addressed run IDs
//! - CSV price loading and TOML analysis configs for the CLI

pub mod config;
pub mod data_loader;
pub mod evaluation;
pub mod metrics;
pub mod runner;
pub mod sweep;

pub use config::{AnalysisConfig, ConfigError, StrategyParams};
pub use data_loader::{load_csv, LoadError};
pub use evaluation::{evaluate_signal, ForwardReturnStats, SignalEvaluation};
pub use metrics::{compute_risk, MonthlyReturn, RiskReport};
pub use runner::{run_strategy, RunError, StrategyRun};
pub use sweep::{run_sweep, ParamGrid, ParameterError, SweepResult, SweepRow};
