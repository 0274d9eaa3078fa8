//! AI-module feature inputs — opaque scalars the bots may read.
//!
//! Sentiment, anomaly, options-flow and similar scores are produced outside
//! the core; here they are just named numeric inputs. A feature set carries
//! the feed mode it was built for, and `require` fails loudly when a bot asks
//! for a feature the mode does not supply — backtests must never silently
//! substitute a neutral default for a live-only input.

use crate::error::EvalError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which pipeline the series (and its features) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedMode {
    Backtest,
    Live,
}

/// Named scalar features available to strategies at one evaluation point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSet {
    mode: FeedMode,
    values: HashMap<String, f64>,
}

impl FeatureSet {
    pub fn new(mode: FeedMode) -> Self {
        Self {
            mode,
            values: HashMap::new(),
        }
    }

    /// Empty backtest-mode set: feature-dependent bots will error, which is
    /// the intended behavior when no historical feature values exist.
    pub fn backtest() -> Self {
        Self::new(FeedMode::Backtest)
    }

    pub fn live() -> Self {
        Self::new(FeedMode::Live)
    }

    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Fetch a feature a bot cannot evaluate without.
    pub fn require(&self, name: &str) -> Result<f64, EvalError> {
        self.get(name).ok_or_else(|| EvalError::FeatureUnavailable {
            feature: name.to_string(),
            mode: self.mode,
        })
    }
}
