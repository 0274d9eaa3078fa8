//! Breakout Hunter — trades closes through the recent range extremes when
//! volume confirms participation.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{rolling_high, rolling_low, volume_ratio};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct BreakoutHunterConfig {
    pub range_lookback: usize,
    pub volume_lookback: usize,
    pub min_volume_spike: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for BreakoutHunterConfig {
    fn default() -> Self {
        Self {
            range_lookback: 30,
            volume_lookback: 20,
            min_volume_spike: 1.8,
            stop_pct: 0.02,
            target_pct: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BreakoutHunter {
    config: BreakoutHunterConfig,
}

const ID: &str = "breakout_hunter";

impl BreakoutHunter {
    pub fn new(config: BreakoutHunterConfig) -> Result<Self, ConfigError> {
        ensure(config.range_lookback >= 1, ID, "range_lookback", "must be >= 1")?;
        ensure(config.volume_lookback >= 1, ID, "volume_lookback", "must be >= 1")?;
        ensure(config.min_volume_spike > 0.0, ID, "min_volume_spike", "must be > 0")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: BreakoutHunterConfig::default(),
        }
    }
}

impl Strategy for BreakoutHunter {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Breakout Hunter"
    }

    fn min_lookback(&self) -> usize {
        (self.config.range_lookback + 1).max(self.config.volume_lookback + 1)
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
        let Ok(vratio) = volume_ratio(series, index, cfg.volume_lookback) else {
            return Ok(None);
        };
        if vratio < cfg.min_volume_spike {
            return Ok(None);
        }
        let Ok(ceiling) = rolling_high(series, index, cfg.range_lookback) else {
            return Ok(None);
        };
        let Ok(floor) = rolling_low(series, index, cfg.range_lookback) else {
            return Ok(None);
        };

        if bar.close > ceiling {
            let reason = format!(
                "Breakout above {}-bar high on {vratio:.1}x volume",
                cfg.range_lookback
            );
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                0.74,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if bar.close < floor {
            let reason = format!(
                "Breakdown below {}-bar low on {vratio:.1}x volume",
                cfg.range_lookback
            );
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                0.74,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        Ok(None)
    }
}
