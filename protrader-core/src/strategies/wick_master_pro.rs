//! Wick Master Pro — rejection-wick reversal trading.
//!
//! Buys when a long lower wick on elevated volume shows sellers being
//! rejected (close pinned to the lower third of the range), sells the
//! mirrored upper-wick case. Confidence grows with how far the wick ratio
//! clears its threshold.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{lower_wick_ratio, range_position, upper_wick_ratio, volume_ratio};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct WickMasterConfig {
    pub min_wick_ratio: f64,
    pub min_volume_spike: f64,
    pub volume_lookback: usize,
    pub stop_pct: f64,
    pub target_pct: f64,
    pub min_confidence: f64,
}

impl Default for WickMasterConfig {
    fn default() -> Self {
        Self {
            min_wick_ratio: 2.0,
            min_volume_spike: 1.5,
            volume_lookback: 20,
            stop_pct: 0.02,
            target_pct: 0.04,
            min_confidence: 0.60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WickMasterPro {
    config: WickMasterConfig,
}

const ID: &str = "wick_master_pro";

impl WickMasterPro {
    pub fn new(config: WickMasterConfig) -> Result<Self, ConfigError> {
        ensure(config.min_wick_ratio > 0.0, ID, "min_wick_ratio", "must be > 0")?;
        ensure(config.min_volume_spike > 0.0, ID, "min_volume_spike", "must be > 0")?;
        ensure(config.volume_lookback >= 1, ID, "volume_lookback", "must be >= 1")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        ensure(
            (0.0..=1.0).contains(&config.min_confidence),
            ID,
            "min_confidence",
            "must be in [0, 1]",
        )?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: WickMasterConfig::default(),
        }
    }

    /// Monotonic in the wick's excess over its threshold, clamped to [0, 1].
    /// Exactly at the threshold the confidence equals `min_confidence`.
    fn confidence(&self, wick: f64) -> f64 {
        let excess = wick / self.config.min_wick_ratio - 1.0;
        (self.config.min_confidence + 0.2 * excess).clamp(0.0, 1.0)
    }
}

impl Strategy for WickMasterPro {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Wick Master Pro"
    }

    fn min_lookback(&self) -> usize {
        self.config.volume_lookback + 1
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
        let Ok(vratio) = volume_ratio(series, index, self.config.volume_lookback) else {
            return Ok(None);
        };
        if vratio < self.config.min_volume_spike {
            return Ok(None);
        }
        let Ok(pos) = range_position(series, index) else {
            return Ok(None);
        };

        let cfg = &self.config;
        let (side, wick) = if pos <= 1.0 / 3.0 {
            // Close in the lower third: look for a bullish rejection below.
            let Ok(wick) = lower_wick_ratio(series, index) else {
                return Ok(None);
            };
            (SignalType::Buy, wick)
        } else if pos >= 2.0 / 3.0 {
            let Ok(wick) = upper_wick_ratio(series, index) else {
                return Ok(None);
            };
            (SignalType::Sell, wick)
        } else {
            return Ok(None);
        };

        if wick < cfg.min_wick_ratio {
            return Ok(None);
        }
        let confidence = self.confidence(wick);
        if confidence < cfg.min_confidence {
            return Ok(None);
        }

        let reason = match side {
            SignalType::Buy => format!(
                "Bullish rejection wick {wick:.1}x body on {vratio:.1}x volume"
            ),
            _ => format!("Bearish rejection wick {wick:.1}x body on {vratio:.1}x volume"),
        };
        Ok(Some(entry_signal(
            ID, series, bar, side, confidence, cfg.stop_pct, cfg.target_pct, reason,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_util::series_of;

    /// 25 quiet bars, then one bar with a deep lower wick on 3x volume.
    fn rejection_series() -> PriceSeries {
        let mut bars = vec![(100.0, 100.6, 99.4, 100.0, 1_000_000.0); 25];
        // Body 0.2, lower wick 1.8 from the close (ratio 9), close in the
        // lower third of the 94.0..100.6 range, 3x volume.
        bars.push((96.0, 100.6, 94.0, 95.8, 3_000_000.0));
        series_of(&bars)
    }

    #[test]
    fn fires_buy_on_lower_wick_with_volume() {
        let bot = WickMasterPro::default_params();
        let series = rejection_series();
        let sig = bot
            .evaluate(&series, 25, &FeatureSet::backtest())
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Buy);
        assert!(sig.confidence >= 0.60);
        assert!(sig.is_risk_coherent());
        assert_eq!(sig.entry_price, 95.8);
    }

    #[test]
    fn silent_without_volume_spike() {
        let bot = WickMasterPro::default_params();
        let mut bars = vec![(100.0, 100.6, 99.4, 100.0, 1_000_000.0); 25];
        bars.push((100.2, 100.6, 94.0, 95.8, 1_000_000.0));
        let series = series_of(&bars);
        assert!(bot
            .evaluate(&series, 25, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }

    #[test]
    fn silent_during_warmup() {
        let bot = WickMasterPro::default_params();
        let series = rejection_series();
        assert!(bot
            .evaluate(&series, 5, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }

    #[test]
    fn evaluate_is_pure() {
        let bot = WickMasterPro::default_params();
        let series = rejection_series();
        let a = bot.evaluate(&series, 25, &FeatureSet::backtest()).unwrap();
        let b = bot.evaluate(&series, 25, &FeatureSet::backtest()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = WickMasterConfig {
            min_wick_ratio: -1.0,
            ..Default::default()
        };
        assert!(WickMasterPro::new(config).is_err());

        let config = WickMasterConfig {
            volume_lookback: 0,
            ..Default::default()
        };
        assert!(WickMasterPro::new(config).is_err());
    }
}
