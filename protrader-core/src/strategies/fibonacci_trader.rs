//! Fibonacci Trader — enters at key retracement levels in the direction of
//! the prevailing trend.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{fibonacci_levels, sma};

use super::{ensure, entry_signal, Strategy};

/// Retracement depths considered actionable.
const KEY_ENTRY_RATIOS: [f64; 3] = [0.382, 0.500, 0.618];

#[derive(Debug, Clone)]
pub struct FibonacciTraderConfig {
    pub swing_lookback: usize,
    pub level_tolerance: f64,
    pub trend_period: usize,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for FibonacciTraderConfig {
    fn default() -> Self {
        Self {
            swing_lookback: 50,
            level_tolerance: 0.005,
            trend_period: 20,
            stop_pct: 0.025,
            target_pct: 0.07,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FibonacciTrader {
    config: FibonacciTraderConfig,
}

const ID: &str = "fibonacci_trader";

impl FibonacciTrader {
    pub fn new(config: FibonacciTraderConfig) -> Result<Self, ConfigError> {
        ensure(config.swing_lookback >= 2, ID, "swing_lookback", "must be >= 2")?;
        ensure(config.level_tolerance > 0.0, ID, "level_tolerance", "must be > 0")?;
        ensure(config.trend_period >= 1, ID, "trend_period", "must be >= 1")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: FibonacciTraderConfig::default(),
        }
    }
}

impl Strategy for FibonacciTrader {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Fibonacci Trader"
    }

    fn min_lookback(&self) -> usize {
        self.config.swing_lookback.max(self.config.trend_period)
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
        let Ok(levels) = fibonacci_levels(series, index, cfg.swing_lookback) else {
            return Ok(None);
        };
        let Ok(trend) = sma(series, index, cfg.trend_period) else {
            return Ok(None);
        };
        let Some(ratio) = levels.nearest(bar.close, cfg.level_tolerance) else {
            return Ok(None);
        };
        if !KEY_ENTRY_RATIOS.iter().any(|&r| (r - ratio).abs() < 1e-9) {
            return Ok(None);
        }

        if bar.close > trend {
            let reason = format!("Retracement holding {:.1}% level in uptrend", ratio * 100.0);
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                0.77,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if bar.close < trend {
            let reason = format!(
                "Retracement rejected at {:.1}% level in downtrend",
                ratio * 100.0
            );
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                0.77,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        Ok(None)
    }
}
