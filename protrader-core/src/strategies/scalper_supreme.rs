//! Scalper Supreme — tight-stop entries on short EMA alignment.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{ema, roc};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct ScalperConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub roc_period: usize,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for ScalperConfig {
    fn default() -> Self {
        Self {
            fast_period: 5,
            slow_period: 15,
            roc_period: 5,
            stop_pct: 0.005,
            target_pct: 0.01,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScalperSupreme {
    config: ScalperConfig,
}

const ID: &str = "scalper_supreme";

impl ScalperSupreme {
    pub fn new(config: ScalperConfig) -> Result<Self, ConfigError> {
        ensure(config.fast_period >= 1, ID, "fast_period", "must be >= 1")?;
        ensure(
            config.fast_period < config.slow_period,
            ID,
            "slow_period",
            "must be greater than fast_period",
        )?;
        ensure(config.roc_period >= 1, ID, "roc_period", "must be >= 1")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: ScalperConfig::default(),
        }
    }
}

impl Strategy for ScalperSupreme {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Scalper Supreme"
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
        let Ok(fast) = ema(series, index, cfg.fast_period) else {
            return Ok(None);
        };
        let Ok(slow) = ema(series, index, cfg.slow_period) else {
            return Ok(None);
        };
        let Ok(momentum) = roc(series, index, cfg.roc_period) else {
            return Ok(None);
        };

        if fast > slow && momentum > 0.0 {
            let reason = "Fast EMA above slow with positive momentum".to_string();
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
        if fast < slow && momentum < 0.0 {
            let reason = "Fast EMA below slow with negative momentum".to_string();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_util::series_of;

    #[test]
    fn fires_sell_in_short_downtrend() {
        let bot = ScalperSupreme::default_params();
        let bars: Vec<(f64, f64, f64, f64, f64)> = (0..25)
            .map(|i| {
                let close = 110.0 - i as f64 * 0.4;
                (close + 0.3, close + 0.5, close - 0.2, close, 800_000.0)
            })
            .collect();
        let series = series_of(&bars);
        let sig = bot
            .evaluate(&series, 24, &FeatureSet::backtest())
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Sell);
        assert!(sig.stop_loss > sig.entry_price);
        assert!(sig.take_profit < sig.entry_price);
    }

    #[test]
    fn silent_during_warmup() {
        let bot = ScalperSupreme::default_params();
        let bars: Vec<(f64, f64, f64, f64, f64)> = (0..10)
            .map(|i| {
                let close = 100.0 + i as f64 * 0.2;
                (close - 0.1, close + 0.2, close - 0.3, close, 800_000.0)
            })
            .collect();
        let series = series_of(&bars);
        assert!(bot
            .evaluate(&series, 9, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }

    #[test]
    fn rejects_equal_periods() {
        let config = ScalperConfig {
            fast_period: 10,
            slow_period: 10,
            ..Default::default()
        };
        assert!(ScalperSupreme::new(config).is_err());
    }
}
