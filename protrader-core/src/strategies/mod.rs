//! Strategy bots — one polymorphic capability, fifteen variants.
//!
//! Every bot implements `Strategy::evaluate`: indicator snapshot in,
//! optional signal out. Bots are stateless (repeated calls with the same
//! inputs return identical results) and portfolio-agnostic; insufficient
//! history is a normal "no opinion" outcome, never an error. Each bot owns
//! an immutable, construction-validated config.

pub mod breakout_hunter;
pub mod fibonacci_trader;
pub mod gap_trader_pro;
pub mod macd_master;
pub mod mean_reversion_pro;
pub mod momentum_master;
pub mod news_sentiment_trader;
pub mod options_flow_tracker;
pub mod pattern_recognition_bot;
pub mod scalper_supreme;
pub mod support_resistance_master;
pub mod swing_trader_pro;
pub mod trend_follower_elite;
pub mod volume_profile_trader;
pub mod wick_master_pro;

pub use breakout_hunter::BreakoutHunter;
pub use fibonacci_trader::FibonacciTrader;
pub use gap_trader_pro::GapTraderPro;
pub use macd_master::MacdMaster;
pub use mean_reversion_pro::MeanReversionPro;
pub use momentum_master::MomentumMaster;
pub use news_sentiment_trader::NewsSentimentTrader;
pub use options_flow_tracker::OptionsFlowTracker;
pub use pattern_recognition_bot::PatternRecognitionBot;
pub use scalper_supreme::ScalperSupreme;
pub use support_resistance_master::SupportResistanceMaster;
pub use swing_trader_pro::SwingTraderPro;
pub use trend_follower_elite::TrendFollowerElite;
pub use volume_profile_trader::VolumeProfileTrader;
pub use wick_master_pro::WickMasterPro;

use crate::domain::{PriceBar, PriceSeries, Signal, SignalType};
use crate::error::{ConfigError, EvalError};
use crate::features::FeatureSet;

/// Trait for strategy bots.
///
/// # Architecture invariant
/// `evaluate` receives only the series, an index, and the feature set; it
/// must use data from `bars[0..=index]` only and may not retain state
/// between calls. Backtest replay and live aggregation share this exact
/// contract, so behavior verified in backtests matches live generation.
pub trait Strategy: Send + Sync {
    /// Stable machine id (e.g. "wick_master_pro").
    fn id(&self) -> &'static str;

    /// Display name (e.g. "Wick Master Pro").
    fn name(&self) -> &'static str;

    /// Bars needed before this bot can have an opinion.
    fn min_lookback(&self) -> usize;

    /// Evaluate at `index`.
    ///
    /// `Ok(None)` covers both "rule not met" and "not enough history".
    /// `Err` is reserved for genuine faults such as a missing AI feature.
    fn evaluate(
        &self,
        series: &PriceSeries,
        index: usize,
        features: &FeatureSet,
    ) -> Result<Option<Signal>, EvalError>;
}

/// All fifteen bots with default parameters, in registration order.
///
/// The order is part of the public contract: the aggregator breaks
/// confidence ties by it, so it must stay stable across releases.
pub fn registry() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(WickMasterPro::default_params()),
        Box::new(MomentumMaster::default_params()),
        Box::new(MeanReversionPro::default_params()),
        Box::new(TrendFollowerElite::default_params()),
        Box::new(ScalperSupreme::default_params()),
        Box::new(BreakoutHunter::default_params()),
        Box::new(GapTraderPro::default_params()),
        Box::new(MacdMaster::default_params()),
        Box::new(VolumeProfileTrader::default_params()),
        Box::new(SwingTraderPro::default_params()),
        Box::new(FibonacciTrader::default_params()),
        Box::new(SupportResistanceMaster::default_params()),
        Box::new(PatternRecognitionBot::default_params()),
        Box::new(NewsSentimentTrader::default_params()),
        Box::new(OptionsFlowTracker::default_params()),
    ]
}

/// Stop/target prices at fixed percent distances from the entry, with the
/// inequalities oriented by direction. Hold carries no levels.
pub(crate) fn risk_levels(
    entry: f64,
    stop_pct: f64,
    target_pct: f64,
    side: SignalType,
) -> (f64, f64) {
    match side {
        SignalType::Buy => (entry * (1.0 - stop_pct), entry * (1.0 + target_pct)),
        SignalType::Sell => (entry * (1.0 + stop_pct), entry * (1.0 - target_pct)),
        SignalType::Hold => (entry, entry),
    }
}

/// Build an entry signal off the bar's close and timestamp.
pub(crate) fn entry_signal(
    strategy_id: &str,
    series: &PriceSeries,
    bar: &PriceBar,
    side: SignalType,
    confidence: f64,
    stop_pct: f64,
    target_pct: f64,
    reason: String,
) -> Signal {
    let entry = bar.close;
    let (stop_loss, take_profit) = risk_levels(entry, stop_pct, target_pct, side);
    Signal {
        strategy_id: strategy_id.to_string(),
        symbol: series.symbol().to_string(),
        signal_type: side,
        confidence: confidence.clamp(0.0, 1.0),
        entry_price: entry,
        stop_loss,
        take_profit,
        reason,
        timestamp: bar.timestamp,
    }
}

/// Construction-time validation helper.
pub(crate) fn ensure(
    cond: bool,
    owner: &'static str,
    param: &'static str,
    message: &str,
) -> Result<(), ConfigError> {
    if cond {
        Ok(())
    } else {
        Err(ConfigError::new(owner, param, message))
    }
}
