//! Swing Trader Pro — buys pullbacks inside an uptrend, sells rallies inside
//! a downtrend.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{rsi, sma};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct SwingTraderConfig {
    pub trend_period: usize,
    pub rsi_period: usize,
    pub pullback_rsi: f64,
    pub rally_rsi: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for SwingTraderConfig {
    fn default() -> Self {
        Self {
            trend_period: 50,
            rsi_period: 14,
            pullback_rsi: 40.0,
            rally_rsi: 60.0,
            stop_pct: 0.035,
            target_pct: 0.07,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwingTraderPro {
    config: SwingTraderConfig,
}

const ID: &str = "swing_trader_pro";

impl SwingTraderPro {
    pub fn new(config: SwingTraderConfig) -> Result<Self, ConfigError> {
        ensure(config.trend_period >= 1, ID, "trend_period", "must be >= 1")?;
        ensure(config.rsi_period >= 1, ID, "rsi_period", "must be >= 1")?;
        ensure(
            0.0 < config.pullback_rsi && config.pullback_rsi < config.rally_rsi
                && config.rally_rsi < 100.0,
            ID,
            "pullback_rsi",
            "bands must satisfy 0 < pullback < rally < 100",
        )?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: SwingTraderConfig::default(),
        }
    }
}

impl Strategy for SwingTraderPro {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Swing Trader Pro"
    }

    fn min_lookback(&self) -> usize {
        self.config.trend_period.max(self.config.rsi_period + 1)
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
        let Ok(trend) = sma(series, index, cfg.trend_period) else {
            return Ok(None);
        };
        let Ok(strength) = rsi(series, index, cfg.rsi_period) else {
            return Ok(None);
        };

        if bar.close > trend && strength < cfg.pullback_rsi {
            let reason = format!("Pullback in uptrend, RSI {strength:.1}");
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                0.71,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if bar.close < trend && strength > cfg.rally_rsi {
            let reason = format!("Rally in downtrend, RSI {strength:.1}");
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                0.71,
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
    fn fires_buy_on_pullback_in_uptrend() {
        let bot = SwingTraderPro::default_params();
        // Strong climb keeps the close well above the 50-bar average, then a
        // sharp dip drives short-term RSI down without breaking the trend.
        let mut closes: Vec<f64> = (0..55).map(|i| 100.0 + i as f64).collect();
        for i in 0..10 {
            closes.push(154.0 - i as f64 * 1.5);
        }
        let bars: Vec<(f64, f64, f64, f64, f64)> = closes
            .iter()
            .map(|&c| (c, c + 0.5, c - 0.5, c, 1_000_000.0))
            .collect();
        let series = series_of(&bars);
        let index = series.len() - 1;
        let sig = bot
            .evaluate(&series, index, &FeatureSet::backtest())
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Buy);
        assert!(sig.reason.contains("Pullback"));
    }

    #[test]
    fn silent_when_trend_and_rsi_agree() {
        let bot = SwingTraderPro::default_params();
        // Steady uptrend keeps RSI high, so no pullback entry exists.
        let bars: Vec<(f64, f64, f64, f64, f64)> = (0..60)
            .map(|i| {
                let close = 100.0 + i as f64 * 0.8;
                (close, close + 0.5, close - 0.5, close, 1_000_000.0)
            })
            .collect();
        let series = series_of(&bars);
        assert!(bot
            .evaluate(&series, 59, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }

    #[test]
    fn rejects_inverted_rsi_bands() {
        let config = SwingTraderConfig {
            pullback_rsi: 70.0,
            rally_rsi: 30.0,
            ..Default::default()
        };
        assert!(SwingTraderPro::new(config).is_err());
    }
}
