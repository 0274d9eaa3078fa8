//! Gap Trader Pro — follows opening gaps that arrive with volume behind them.

use crate::domain::{PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;
use crate::indicators::{gap_pct, volume_ratio};

use super::{ensure, entry_signal, Strategy};

#[derive(Debug, Clone)]
pub struct GapTraderConfig {
    pub min_gap_pct: f64,
    pub volume_lookback: usize,
    pub min_volume_ratio: f64,
    pub stop_pct: f64,
    pub target_pct: f64,
    pub base_confidence: f64,
}

impl Default for GapTraderConfig {
    fn default() -> Self {
        Self {
            min_gap_pct: 0.02,
            volume_lookback: 20,
            min_volume_ratio: 1.5,
            stop_pct: 0.02,
            target_pct: 0.04,
            base_confidence: 0.65,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GapTraderPro {
    config: GapTraderConfig,
}

const ID: &str = "gap_trader_pro";

impl GapTraderPro {
    pub fn new(config: GapTraderConfig) -> Result<Self, ConfigError> {
        ensure(config.min_gap_pct > 0.0, ID, "min_gap_pct", "must be > 0")?;
        ensure(config.volume_lookback >= 1, ID, "volume_lookback", "must be >= 1")?;
        ensure(config.min_volume_ratio > 0.0, ID, "min_volume_ratio", "must be > 0")?;
        ensure(config.stop_pct > 0.0 && config.stop_pct < 1.0, ID, "stop_pct", "must be in (0, 1)")?;
        ensure(config.target_pct > 0.0, ID, "target_pct", "must be > 0")?;
        ensure(
            (0.0..=1.0).contains(&config.base_confidence),
            ID,
            "base_confidence",
            "must be in [0, 1]",
        )?;
        Ok(Self { config })
    }

    pub fn default_params() -> Self {
        Self {
            config: GapTraderConfig::default(),
        }
    }
}

impl Strategy for GapTraderPro {
    fn id(&self) -> &'static str {
        ID
    }

    fn name(&self) -> &'static str {
        "Gap Trader Pro"
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
        let cfg = &self.config;
        let Ok(gap) = gap_pct(series, index) else {
            return Ok(None);
        };
        if gap.abs() < cfg.min_gap_pct {
            return Ok(None);
        }
        let Ok(vratio) = volume_ratio(series, index, cfg.volume_lookback) else {
            return Ok(None);
        };
        if vratio < cfg.min_volume_ratio {
            return Ok(None);
        }

        // Larger gaps earn more conviction, scaled off the threshold.
        let confidence =
            (cfg.base_confidence + 0.1 * (gap.abs() / cfg.min_gap_pct - 1.0)).clamp(0.0, 1.0);
        let (side, label) = if gap > 0.0 {
            (SignalType::Buy, "up")
        } else {
            (SignalType::Sell, "down")
        };
        let reason = format!(
            "Gap {label} {:.1}% on {vratio:.1}x volume",
            gap.abs() * 100.0
        );
        Ok(Some(entry_signal(
            ID,
            series,
            bar,
            side,
            confidence,
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

    fn gapped_series(open: f64, volume: f64) -> PriceSeries {
        let mut bars: Vec<(f64, f64, f64, f64, f64)> = (0..22)
            .map(|_| (100.0, 100.5, 99.5, 100.0, 1_000_000.0))
            .collect();
        let close = open + 0.5;
        bars.push((open, close + 0.5, open - 0.5, close, volume));
        series_of(&bars)
    }

    #[test]
    fn fires_buy_on_gap_up() {
        let bot = GapTraderPro::default_params();
        let series = gapped_series(103.0, 2_000_000.0);
        let sig = bot
            .evaluate(&series, 22, &FeatureSet::backtest())
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Buy);
        assert!(sig.confidence > 0.65);
        assert!(sig.reason.contains("Gap up"));
    }

    #[test]
    fn fires_sell_on_gap_down() {
        let bot = GapTraderPro::default_params();
        let series = gapped_series(97.0, 2_000_000.0);
        let sig = bot
            .evaluate(&series, 22, &FeatureSet::backtest())
            .unwrap()
            .expect("should fire");
        assert_eq!(sig.signal_type, SignalType::Sell);
    }

    #[test]
    fn silent_on_small_gap() {
        let bot = GapTraderPro::default_params();
        let series = gapped_series(100.5, 2_000_000.0);
        assert!(bot
            .evaluate(&series, 22, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }

    #[test]
    fn silent_without_volume() {
        let bot = GapTraderPro::default_params();
        let series = gapped_series(103.0, 900_000.0);
        assert!(bot
            .evaluate(&series, 22, &FeatureSet::backtest())
            .unwrap()
            .is_none());
    }
}
