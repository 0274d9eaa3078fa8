//! Volume Profile Trader — buys the bottom of the recent range and sells the
//! top, but only when volume shows real participation.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{rolling_high, rolling_low, volume_ratio, EPSILON};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct VolumeProfileConfig {
    pub range_lookback: usize,
    pub volume_lookback: usize,
    pub min_volume_ratio: f64,
    pub zone_fraction: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for VolumeProfileConfig {
    fn default() -> Self {
        Self {
            range_lookback: 50,
            volume_lookback: 20,
            min_volume_ratio: 1.5,
            zone_fraction: 0.3,
            stop_pct: 0.025,
            target_pct: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VolumeProfileTrader {
    config: VolumeProfileConfig,
}

const ID: &str = "volume_profile_trader";

impl VolumeProfileTrader {
    pub fn new(config: VolumeProfileConfig) -> Result<Self, ConfigError> {
        ensure(config.range_lookback >= 1, ID, "range_lookback", "must be >= 1")?;
        ensure(config.volume_lookback >= 1, ID, "volume_lookback", "must be >= 1")?;
        ensure(config.min_volume_ratio > 0.0, ID, "min_volume_ratio", "must be > 0")?;
        ensure(
            config.zone_fraction > 0.0 && config.zone_fraction < 0.5,
            ID,
            "zone_fraction",
            "must be in (0, 0.5)",
        )?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: VolumeProfileConfig::default(),
        }
    }
}

impl Strategy for VolumeProfileTrader {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Volume Profile Trader"
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
        if vratio < cfg.min_volume_ratio {
            return Ok(None);
        }
        let Ok(ceiling) = rolling_high(series, index, cfg.range_lookback) else {
            return Ok(None);
        };
        let Ok(floor) = rolling_low(series, index, cfg.range_lookback) else {
            return Ok(None);
        };
        let span = ceiling - floor;
        if span < EPSILON {
            return Ok(None);
        }
        let position = (bar.close - floor) / span;

        if position <= cfg.zone_fraction {
            let reason = format!(
                "Accumulation near range low, {vratio:.1}x volume, position {:.0}%",
                position * 100.0
            );
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                0.70,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if position >= 1.0 - cfg.zone_fraction {
            let reason = format!(
                "Distribution near range high, {vratio:.1}x volume, position {:.0}%",
                position * 100.0
            );
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                0.70,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        Ok(None)
    }
}
