//! Trend Follower Elite — rides established moving-average trends with a
//! rate-of-change momentum filter.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{roc, sma};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct TrendFollowerConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub roc_period: usize,
    pub min_roc: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for TrendFollowerConfig {
    fn default() -> Self {
        Self {
            fast_period: 20,
            slow_period: 50,
            roc_period: 10,
            min_roc: 0.02,
            stop_pct: 0.03,
            target_pct: 0.06,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrendFollowerElite {
    config: TrendFollowerConfig,
}

const ID: &str = "trend_follower_elite";

impl TrendFollowerElite {
    pub fn new(config: TrendFollowerConfig) -> Result<Self, ConfigError> {
        ensure(config.fast_period >= 1, ID, "fast_period", "must be >= 1")?;
        ensure(
            config.fast_period < config.slow_period,
            ID,
            "slow_period",
            "must be greater than fast_period",
        )?;
        ensure(config.roc_period >= 1, ID, "roc_period", "must be >= 1")?;
        ensure(config.min_roc > 0.0, ID, "min_roc", "must be > 0")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: TrendFollowerConfig::default(),
        }
    }
}

impl Strategy for TrendFollowerElite {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Trend Follower Elite"
    }

    fn min_lookback(&self) -> usize {
        self.config.slow_period
    }

    fn evaluate(
        &self,
        series: &PriceSeries,
        index: usize,
        _features: &FeatureSet,
    ) -> Result<Option<Signal>, EvalError> {
        let Some(bar) = series.bar(index) else {
            return Ok(None);
        };
        let cfg = &self.config;
        let Ok(fast) = sma(series, index, cfg.fast_period) else {
            return Ok(None);
        };
        let Ok(slow) = sma(series, index, cfg.slow_period) else {
            return Ok(None);
        };
        let Ok(momentum) = roc(series, index, cfg.roc_period) else {
            return Ok(None);
        };

        if fast > slow && bar.close > fast && momentum >= cfg.min_roc {
            let reason = format!(
                "Uptrend - fast MA above slow, ROC {:.1}%",
                momentum * 100.0
            );
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                0.72,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if fast < slow && bar.close < fast && momentum <= -cfg.min_roc {
            let reason = format!(
                "Downtrend - fast MA below slow, ROC {:.1}%",
                momentum * 100.0
            );
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                0.72,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        Ok(None)
    }
}
