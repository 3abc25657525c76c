//! Input validation errors.
//!
//! These are fatal to the call that triggered them: the caller must supply
//! valid data or parameters. Undefined *metrics* (zero-std z-score, zero-std
//! Sharpe, …) are not errors — they surface as `None` fields instead.

use thiserror::Error;

/// Malformed input data or degenerate parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("bar dates must be strictly increasing (violated at index {index})")]
    NonMonotonicDates { index: usize },

    #[error("bar at index {index} fails OHLC sanity (high >= low/open/close, prices > 0)")]
    InsaneBar { index: usize },

    #[error("window must be >= 1")]
    ZeroWindow,

    #[error("window {window} exceeds series length {len}")]
    WindowExceedsData { window: usize, len: usize },

    #[error("cooldown_days must be >= 1")]
    ZeroCooldown,

    #[error("horizon must be >= 1")]
    ZeroHorizon,

    #[error("series length mismatch: prices has {prices} bars, signals has {signals}")]
    LengthMismatch { prices: usize, signals: usize },
}
