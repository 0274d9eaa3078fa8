//! Momentum Master — breakout trading with RSI and volume confirmation.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{rolling_high, rolling_low, rsi, volume_ratio};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct MomentumMasterConfig {
    pub breakout_lookback: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub volume_lookback: usize,
    pub volume_threshold: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
    pub min_confidence: f64,
}

impl Default for MomentumMasterConfig {
    fn default() -> Self {
        Self {
            breakout_lookback: 20,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            volume_lookback: 20,
            volume_threshold: 1.5,
            stop_pct: 0.025,
            target_pct: 0.05,
            min_confidence: 0.65,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MomentumMaster {
    config: MomentumMasterConfig,
}

const ID: &str = "momentum_master";

impl MomentumMaster {
    pub fn new(config: MomentumMasterConfig) -> Result<Self, ConfigError> {
        ensure(config.breakout_lookback >= 1, ID, "breakout_lookback", "must be >= 1")?;
        ensure(config.rsi_period >= 1, ID, "rsi_period", "must be >= 1")?;
        ensure(
            0.0 < config.rsi_oversold && config.rsi_oversold < config.rsi_overbought
                && config.rsi_overbought < 100.0,
            ID,
            "rsi_oversold",
            "bands must satisfy 0 < oversold < overbought < 100",
        )?;
        ensure(config.volume_lookback >= 1, ID, "volume_lookback", "must be >= 1")?;
        ensure(config.volume_threshold > 0.0, ID, "volume_threshold", "must be > 0")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: MomentumMasterConfig::default(),
        }
    }
}

impl Strategy for MomentumMaster {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Momentum Master"
    }

    fn min_lookback(&self) -> usize {
        (self.config.breakout_lookback + 1)
            .max(self.config.rsi_period + 1)
            .max(self.config.volume_lookback + 1)
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
        let Ok(resistance) = rolling_high(series, index, cfg.breakout_lookback) else {
            return Ok(None);
        };
        let Ok(support) = rolling_low(series, index, cfg.breakout_lookback) else {
            return Ok(None);
        };
        let Ok(strength) = rsi(series, index, cfg.rsi_period) else {
            return Ok(None);
        };
        let Ok(vratio) = volume_ratio(series, index, cfg.volume_lookback) else {
            return Ok(None);
        };
        if vratio < cfg.volume_threshold {
            return Ok(None);
        }

        // Breakouts into exhausted RSI territory are skipped: a break above
        // resistance with RSI already overbought tends to fade.
        if bar.close > resistance && strength < cfg.rsi_overbought {
            let confidence = 0.75;
            let reason = format!("Bullish breakout above {resistance:.2} on {vratio:.1}x volume");
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                confidence,
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if bar.close < support && strength > cfg.rsi_oversold {
            let confidence = 0.75;
            let reason = format!("Bearish breakdown below {support:.2} on {vratio:.1}x volume");
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                confidence,
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

    fn breakout_series() -> PriceSeries {
        // 30 bars oscillating in 98..102, then a close above the range
        // high on heavy volume.
        let mut bars: Vec<(f64, f64, f64, f64, f64)> = (0..30)
            .map(|i| {
                let close = if i % 2 == 0 { 99.0 } else { 101.0 };
                (100.0, 102.0, 98.0, close, 1_000_000.0)
            })
            .collect();
        bars.push((101.0, 105.0, 100.5, 104.5, 3_000_000.0));
        series_of(&bars)
    }

    #[test]
    fn fires_buy_on_breakout() {
        let bot = MomentumMaster::default_params();
        let series = breakout_series();
        let sig = bot
            .evaluate(&series, 30, &FeatureSet::backtest())
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Buy);
        assert!(sig.reason.contains("breakout"));
        assert!(sig.is_risk_coherent());
    }

    #[test]
    fn silent_inside_range() {
        let bot = MomentumMaster::default_params();
        let mut bars: Vec<(f64, f64, f64, f64, f64)> = (0..30)
            .map(|i| {
                let close = if i % 2 == 0 { 99.0 } else { 101.0 };
                (100.0, 102.0, 98.0, close, 1_000_000.0)
            })
            .collect();
        bars.push((101.0, 102.0, 100.0, 101.5, 3_000_000.0));
        let series = series_of(&bars);
        assert!(bot
            .evaluate(&series, 30, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }

    #[test]
    fn silent_without_volume() {
        let bot = MomentumMaster::default_params();
        let mut bars: Vec<(f64, f64, f64, f64, f64)> = (0..30)
            .map(|i| {
                let close = if i % 2 == 0 { 99.0 } else { 101.0 };
                (100.0, 102.0, 98.0, close, 1_000_000.0)
            })
            .collect();
        bars.push((101.0, 105.0, 100.5, 104.5, 1_000_000.0));
        let series = series_of(&bars);
        assert!(bot
            .evaluate(&series, 30, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }

    #[test]
    fn rejects_inverted_rsi_bands() {
        let config = MomentumMasterConfig {
            rsi_oversold: 80.0,
            rsi_overbought: 20.0,
            ..Default::default()
        };
        assert!(MomentumMaster::new(config).is_err());
    }
}
