//! Error taxonomy for the core engine.
//!
//! Three fault classes with very different lifetimes:
//! - `IndicatorError::InsufficientData` is recovered locally by every bot as
//!   a none-signal. It never crosses the strategy boundary as a fault.
//! - `ConfigError` is fatal at construction: a bot with an out-of-domain
//!   parameter cannot be registered at all.
//! - `SeriesError` / `BacktestError` abort a single run and are reported to
//!   the caller. A backtest is all-or-nothing; no partial ledgers.

use crate::features::FeedMode;
use thiserror::Error;

/// Failure of a single indicator computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// Fewer bars precede the index than the lookback requires.
    ///
    /// This is a normal "no opinion" condition for strategies, not a fault.
    #[error("insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// A strategy or simulator parameter outside its valid domain.
///
/// Raised at construction time only; a value that passes construction is
/// immutable and never re-validated.
#[derive(Debug, Clone, Error)]
#[error("invalid config for {owner}: parameter `{param}` {message}")]
pub struct ConfigError {
    pub owner: &'static str,
    pub param: &'static str,
    pub message: String,
}

impl ConfigError {
    pub fn new(owner: &'static str, param: &'static str, message: impl Into<String>) -> Self {
        Self {
            owner,
            param,
            message: message.into(),
        }
    }
}

/// A malformed price series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("price series is empty")]
    Empty,

    #[error("bar {index} is not strictly after its predecessor")]
    NonChronological { index: usize },

    #[error("bar {index} has inconsistent OHLCV values")]
    MalformedBar { index: usize },
}

/// Failure during strategy evaluation.
///
/// Insufficient history is *not* represented here — bots map it to a
/// none-signal before it can surface. What remains are genuine faults.
#[derive(Debug, Clone, Error)]
pub enum EvalError {
    /// A bot asked for an AI feature the current feed mode does not supply.
    ///
    /// Deliberately loud: substituting a neutral default would make backtest
    /// and live behavior silently diverge.
    #[error("feature `{feature}` is unavailable in {mode:?} mode")]
    FeatureUnavailable { feature: String, mode: FeedMode },
}

/// Failure of a whole backtest run.
#[derive(Debug, Clone, Error)]
pub enum BacktestError {
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
