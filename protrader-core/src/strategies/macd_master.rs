//! MACD Master — trades fresh signal-line crossovers.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::macd;

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct MacdMasterConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for MacdMasterConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            stop_pct: 0.025,
            target_pct: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MacdMaster {
    config: MacdMasterConfig,
}

const ID: &str = "macd_master";

impl MacdMaster {
    pub fn new(config: MacdMasterConfig) -> Result<Self, ConfigError> {
        ensure(config.fast_period >= 1, ID, "fast_period", "must be >= 1")?;
        ensure(
            config.fast_period < config.slow_period,
            ID,
            "slow_period",
            "must be greater than fast_period",
        )?;
        ensure(config.signal_period >= 1, ID, "signal_period", "must be >= 1")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: MacdMasterConfig::default(),
        }
    }
}

impl Strategy for MacdMaster {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "MACD Master"
    }

    fn min_lookback(&self) -> usize {
        // One extra bar so the previous-bar reading exists at the first
        // evaluated index.
        self.config.slow_period + self.config.signal_period
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
        if index == 0 {
            return Ok(None);
        }
        let cfg = &self.config;
        let Ok(now) = macd(series, index, cfg.fast_period, cfg.slow_period, cfg.signal_period)
        else {
            return Ok(None);
        };
        let Ok(prev) = macd(
            series,
            index - 1,
            cfg.fast_period,
            cfg.slow_period,
            cfg.signal_period,
        ) else {
            return Ok(None);
        };

        let crossed_up = now.macd > now.signal && prev.macd <= prev.signal;
        let crossed_down = now.macd < now.signal && prev.macd >= prev.signal;

        if crossed_up && now.histogram > 0.0 {
            let reason = format!("Bullish MACD crossover, histogram {:.3}", now.histogram);
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
        if crossed_down && now.histogram < 0.0 {
            let reason = format!("Bearish MACD crossover, histogram {:.3}", now.histogram);
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
        Ok(None)
    }
}
