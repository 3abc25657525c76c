//! Serializable strategy parameters and TOML analysis configs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sweep::ParamGrid;

/// One parameter tuple for the indicator → signal → backtest pipeline.
///
/// Serializable so the external caching layer can key memoized results by
/// content: `run_id()` is a BLAKE3 hash of the canonical JSON encoding, and
/// two identical tuples always share an ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Rolling window for the moving average and std, in bars.
    pub window: usize,
    /// Z-score magnitude at or above which RiskOff fires.
    pub threshold: f64,
    /// Bars spent flat after a RiskOff signal.
    pub cooldown_days: usize,
}

impl StrategyParams {
    /// Deterministic content-addressed identifier for this tuple.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("StrategyParams serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 {
            return Err(ConfigError::Invalid("window must be >= 1".into()));
        }
        if self.cooldown_days == 0 {
            return Err(ConfigError::Invalid("cooldown_days must be >= 1".into()));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "threshold must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Top-level analysis configuration, loadable from TOML.
///
/// ```toml
/// horizon = 5
///
/// [strategy]
/// window = 20
/// threshold = 1.5
/// cooldown_days = 5
///
/// [grid]
/// windows = [10, 20, 30]
/// thresholds = [1.0, 1.5, 2.0]
/// cooldowns = [3, 5, 10]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub strategy: StrategyParams,
    /// Optional sweep grid; absent means single-run analysis only.
    #[serde(default)]
    pub grid: Option<ParamGrid>,
    /// Forward-return horizon for signal evaluation, in bars.
    #[serde(default = "default_horizon")]
    pub horizon: usize,
}

fn default_horizon() -> usize {
    5
}

impl AnalysisConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy.validate()?;
        if self.horizon == 0 {
            return Err(ConfigError::Invalid("horizon must be >= 1".into()));
        }
        if let Some(grid) = &self.grid {
            grid.validate()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        Ok(())
    }
}

/// Errors from the config layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
