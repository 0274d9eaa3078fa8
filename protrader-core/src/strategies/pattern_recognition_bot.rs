//! Pattern Recognition Bot — single-bar reversal candles, with engulfing
//! confirmation from the prior bar.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{bearish_engulfing, bullish_engulfing, hammer_score, shooting_star_score};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct PatternRecognitionConfig {
    pub min_pattern_score: f64,
    pub engulfing_bonus: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for PatternRecognitionConfig {
    fn default() -> Self {
        Self {
            min_pattern_score: 0.6,
            engulfing_bonus: 0.05,
            stop_pct: 0.025,
            target_pct: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatternRecognitionBot {
    config: PatternRecognitionConfig,
}

const ID: &str = "pattern_recognition_bot";

impl PatternRecognitionBot {
    pub fn new(config: PatternRecognitionConfig) -> Result<Self, ConfigError> {
        ensure(
            config.min_pattern_score > 0.0 && config.min_pattern_score < 1.0,
            ID,
            "min_pattern_score",
            "must be in (0, 1)",
        )?;
        ensure(
            (0.0..=0.5).contains(&config.engulfing_bonus),
            ID,
            "engulfing_bonus",
            "must be in [0, 0.5]",
        )?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: PatternRecognitionConfig::default(),
        }
    }

    fn confidence(&self, score: f64, engulfed: bool) -> f64 {
        let cfg = &self.config;
        let scaled =
            0.6 + 0.3 * (score - cfg.min_pattern_score) / (1.0 - cfg.min_pattern_score);
        let bonus = if engulfed { cfg.engulfing_bonus } else { 0.0 };
        (scaled + bonus).clamp(0.0, 1.0)
    }
}

impl Strategy for PatternRecognitionBot {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Pattern Recognition Bot"
    }

    fn min_lookback(&self) -> usize {
        2
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
        let Ok(hammer) = hammer_score(series, index) else {
            return Ok(None);
        };
        let Ok(star) = shooting_star_score(series, index) else {
            return Ok(None);
        };

        if hammer >= cfg.min_pattern_score && hammer >= star {
            let engulfed = bullish_engulfing(series, index).unwrap_or(false);
            let mut reason = format!("Hammer candle, score {hammer:.2}");
            if engulfed {
                reason.push_str(", bullish engulfing");
            }
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Buy,
                self.confidence(hammer, engulfed),
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        if star >= cfg.min_pattern_score {
            let engulfed = bearish_engulfing(series, index).unwrap_or(false);
            let mut reason = format!("Shooting star, score {star:.2}");
            if engulfed {
                reason.push_str(", bearish engulfing");
            }
            return Ok(Some(entry_signal(
                ID,
                series,
                bar,
                SignalType::Sell,
                self.confidence(star, engulfed),
                cfg.stop_pct,
                cfg.target_pct,
                reason,
            )));
        }
        Ok(None)
    }
}
