//! News Sentiment Trader — trades strong sentiment readings delivered through
//! the feature channel, with a volume sanity check.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::volume_ratio;

use super::{ensure, entry_signal, Strategy};

/// Feature key carrying the aggregate news score in [-1, 1].
pub const SENTIMENT_FEATURE: &str = "sentiment";

#[derive(Debug, Clone)]
pub struct NewsSentimentConfig {
    pub min_sentiment: f64,
    pub volume_lookback: usize,
    pub min_volume_spike: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
}

impl Default for NewsSentimentConfig {
    fn default() -> Self {
        Self {
            min_sentiment: 0.6,
            volume_lookback: 20,
            min_volume_spike: 2.0,
            stop_pct: 0.03,
            target_pct: 0.06,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsSentimentTrader {
    config: NewsSentimentConfig,
}

const ID: &str = "news_sentiment_trader";

impl NewsSentimentTrader {
    pub fn new(config: NewsSentimentConfig) -> Result<Self, ConfigError> {
        ensure(
            config.min_sentiment > 0.0 && config.min_sentiment <= 1.0,
            ID,
            "min_sentiment",
            "must be in (0, 1]",
        )?;
        ensure(config.volume_lookback >= 1, ID, "volume_lookback", "must be >= 1")?;
        ensure(config.min_volume_spike > 0.0, ID, "min_volume_spike", "must be > 0")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: NewsSentimentConfig::default(),
        }
    }
}

impl Strategy for NewsSentimentTrader {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "News Sentiment Trader"
    }

    fn min_lookback(&self) -> usize {
        self.config.volume_lookback + 1
    }

    fn evaluate(
        &self,
        series: &PriceSeries,
        index: usize,
        features: &FeatureSet,
    ) -> Result<Option<Signal>, EvalError> {
        let Some(bar) = series.bar(index) else {
            return Ok(None);
        };
        let cfg = &self.config;
        let sentiment = features.require(SENTIMENT_FEATURE)?;
        if sentiment.abs() < cfg.min_sentiment {
            return Ok(None);
        }
        let Ok(vratio) = volume_ratio(series, index, cfg.volume_lookback) else {
            return Ok(None);
        };
        if vratio < cfg.min_volume_spike {
            return Ok(None);
        }

        let (side, label) = if sentiment > 0.0 {
            (SignalType::Buy, "Positive")
        } else {
            (SignalType::Sell, "Negative")
        };
        let reason = format!(
            "{label} news sentiment {:.2} on {vratio:.1}x volume",
            sentiment.abs()
        );
        Ok(Some(entry_signal(
            ID,
            series,
            bar,
            side,
            0.75,
            cfg.stop_pct,
            cfg.target_pct,
            reason,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_util::series_of;

    fn volume_spike_series() -> PriceSeries {
        let mut bars: Vec<(f64, f64, f64, f64, f64)> = (0..22)
            .map(|_| (100.0, 100.5, 99.5, 100.0, 1_000_000.0))
            .collect();
        bars.push((100.0, 101.5, 99.8, 101.2, 2_500_000.0));
        series_of(&bars)
    }

    #[test]
    fn fires_buy_on_strong_positive_sentiment() {
        let bot = NewsSentimentTrader::default_params();
        let series = volume_spike_series();
        let features = FeatureSet::backtest().with(SENTIMENT_FEATURE, 0.8);
        let sig = bot
            .evaluate(&series, 22, &features)
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Buy);
        assert!(sig.reason.contains("Positive"));
    }

    #[test]
    fn fires_sell_on_strong_negative_sentiment() {
        let bot = NewsSentimentTrader::default_params();
        let series = volume_spike_series();
        let features = FeatureSet::backtest().with(SENTIMENT_FEATURE, -0.9);
        let sig = bot
            .evaluate(&series, 22, &features)
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Sell);
    }

    #[test]
    fn silent_on_weak_sentiment() {
        let bot = NewsSentimentTrader::default_params();
        let series = volume_spike_series();
        let features = FeatureSet::backtest().with(SENTIMENT_FEATURE, 0.3);
        assert!(bot.evaluate(&series, 22, &features).unwrap().is_none());
    }

    #[test]
    fn errors_when_feature_missing() {
        let bot = NewsSentimentTrader::default_params();
        let series = volume_spike_series();
        let err = bot
            .evaluate(&series, 22, &FeatureSet::backtest())
            .unwrap_err();
        assert!(matches!(err, EvalError::FeatureUnavailable { .. }));
    }
}
