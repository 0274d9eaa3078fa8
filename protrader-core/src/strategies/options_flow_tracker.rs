//! Options Flow Tracker — follows unusual options positioning delivered
//! through the feature channel.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::volume_ratio;

use super::{ensure, entry_signal, Strategy};

/// Feature key carrying net options flow skew in [-1, 1], positive for call
/// buying pressure.
pub const OPTIONS_FLOW_FEATURE: &str = "options_flow";

#[derive(Debug, Clone)]
pub struct OptionsFlowConfig {
    pub min_flow: f64,
    pub volume_lookback: usize,
    pub min_volume_ratio: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for OptionsFlowConfig {
    fn default() -> Self {
        Self {
            min_flow: 0.5,
            volume_lookback: 20,
            min_volume_ratio: 1.2,
            stop_pct: 0.02,
            target_pct: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptionsFlowTracker {
    config: OptionsFlowConfig,
}

const ID: &str = "options_flow_tracker";

impl OptionsFlowTracker {
    pub fn new(config: OptionsFlowConfig) -> Result<Self, ConfigError> {
        ensure(
            config.min_flow > 0.0 && config.min_flow < 1.0,
            ID,
            "min_flow",
            "must be in (0, 1)",
        )?;
        ensure(config.volume_lookback >= 1, ID, "volume_lookback", "must be >= 1")?;
        ensure(config.min_volume_ratio > 0.0, ID, "min_volume_ratio", "must be > 0")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: OptionsFlowConfig::default(),
        }
    }
}

impl Strategy for OptionsFlowTracker {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Options Flow Tracker"
    }

    fn min_lookback(&self) -> usize {
        self.config.volume_lookback + 1
    }

    fn evaluate(
        &self,
        series: &PriceSeries,
        index: usize,
        features: &FeatureSet,
    ) -> Result<Option<Signal>, EvalError> {
        let Some(bar) = series.bar(index) else {
            return Ok(None);
        };
        let cfg = &self.config;
        let flow = features.require(OPTIONS_FLOW_FEATURE)?;
        if flow.abs() < cfg.min_flow {
            return Ok(None);
        }
        let Ok(vratio) = volume_ratio(series, index, cfg.volume_lookback) else {
            return Ok(None);
        };
        if vratio < cfg.min_volume_ratio {
            return Ok(None);
        }

        let confidence =
            (0.65 + 0.25 * (flow.abs() - cfg.min_flow) / (1.0 - cfg.min_flow)).clamp(0.0, 1.0);
        let (side, label) = if flow > 0.0 {
            (SignalType::Buy, "call")
        } else {
            (SignalType::Sell, "put")
        };
        let reason = format!("Unusual {label} flow, skew {:.2}", flow.abs());
        Ok(Some(entry_signal(
            ID,
            series,
            bar,
            side,
            confidence,
            cfg.stop_pct,
            cfg.target_pct,
            reason,
        )))
    }
}
