//! Mean Reversion Pro — fades oversold/overbought extremes.
//!
//! Buys a close below the lower Bollinger band when RSI confirms oversold,
//! sells the mirrored overbought case.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{bollinger, rsi};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct MeanReversionConfig {
    pub bb_period: usize,
    pub bb_std: f64,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self {
            bb_period: 20,
            bb_std: 2.0,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stop_pct: 0.03,
            target_pct: 0.045,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MeanReversionPro {
    config: MeanReversionConfig,
}

const ID: &str = "mean_reversion_pro";

impl MeanReversionPro {
    pub fn new(config: MeanReversionConfig) -> Result<Self, ConfigError> {
        ensure(config.bb_period >= 2, ID, "bb_period", "must be >= 2")?;
        ensure(config.bb_std > 0.0, ID, "bb_std", "must be > 0")?;
        ensure(config.rsi_period >= 1, ID, "rsi_period", "must be >= 1")?;
        ensure(
            0.0 < config.rsi_oversold && config.rsi_oversold < config.rsi_overbought
                && config.rsi_overbought < 100.0,
            ID,
            "rsi_oversold",
            "bands must satisfy 0 < oversold < overbought < 100",
        )?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: MeanReversionConfig::default(),
        }
    }
}

impl Strategy for MeanReversionPro {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Mean Reversion Pro"
    }

    fn min_lookback(&self) -> usize {
        self.config.bb_period.max(self.config.rsi_period + 1)
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
        let Ok(bands) = bollinger(series, index, cfg.bb_period, cfg.bb_std) else {
            return Ok(None);
        };
        let Ok(strength) = rsi(series, index, cfg.rsi_period) else {
            return Ok(None);
        };

        if bar.close < bands.lower && strength < cfg.rsi_oversold {
            let reason = format!("Oversold - RSI {strength:.1}, close below lower band");
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                0.80,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if bar.close > bands.upper && strength > cfg.rsi_overbought {
            let reason = format!("Overbought - RSI {strength:.1}, close above upper band");
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                0.80,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        Ok(None)
    }
}
