//! Support/Resistance Master — trades bounces off clustered pivot levels,
//! confirmed by a rejection wick.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{
    lower_wick_ratio, nearest_level, support_resistance_levels, upper_wick_ratio,
};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct SupportResistanceConfig {
    pub pivot_lookback: usize,
    pub cluster_tolerance: f64,
    pub proximity: f64,
    pub min_wick_ratio: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for SupportResistanceConfig {
    fn default() -> Self {
        Self {
            pivot_lookback: 40,
            cluster_tolerance: 0.01,
            proximity: 0.005,
            min_wick_ratio: 1.0,
            stop_pct: 0.02,
            target_pct: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SupportResistanceMaster {
    config: SupportResistanceConfig,
}

const ID: &str = "support_resistance_master";

impl SupportResistanceMaster {
    pub fn new(config: SupportResistanceConfig) -> Result<Self, ConfigError> {
        ensure(config.pivot_lookback >= 3, ID, "pivot_lookback", "must be >= 3")?;
        ensure(config.cluster_tolerance > 0.0, ID, "cluster_tolerance", "must be > 0")?;
        ensure(config.proximity > 0.0, ID, "proximity", "must be > 0")?;
        ensure(config.min_wick_ratio > 0.0, ID, "min_wick_ratio", "must be > 0")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: SupportResistanceConfig::default(),
        }
    }
}

impl Strategy for SupportResistanceMaster {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Support Resistance Master"
    }

    fn min_lookback(&self) -> usize {
        self.config.pivot_lookback + 1
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
        let Ok(levels) =
            support_resistance_levels(series, index, cfg.pivot_lookback, cfg.cluster_tolerance)
        else {
            return Ok(None);
        };
        let Some((level, distance)) = nearest_level(&levels, bar.close) else {
            return Ok(None);
        };
        if distance > cfg.proximity {
            return Ok(None);
        }

        if bar.close >= level {
            // Holding above the level with a long lower wick reads as a
            // defended support.
            let Ok(wick) = lower_wick_ratio(series, index) else {
                return Ok(None);
            };
            if wick >= cfg.min_wick_ratio {
                let reason = format!("Support held at {level:.2} with rejection wick");
                return Ok(Some(entry_signal(
                    ID,
                    series,
                    bar,
                    SignalType::Buy,
                    0.73,
                    cfg.stop_pct,
                    cfg.target_pct,
                    reason,
                )));
            }
        } else {
            let Ok(wick) = upper_wick_ratio(series, index) else {
                return Ok(None);
            };
            if wick >= cfg.min_wick_ratio {
                let reason = format!("Resistance rejected at {level:.2}");
                return Ok(Some(entry_signal(
                    ID,
                    series,
                    bar,
                    SignalType::Sell,
                    0.73,
                    cfg.stop_pct,
                    cfg.target_pct,
                    reason,
                )));
            }
        }
        Ok(None)
    }
}
