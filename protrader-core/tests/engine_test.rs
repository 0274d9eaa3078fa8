//! End-to-end engine scenarios: registry bots driven through the simulator
//! and the aggregator on purpose-built series.

use chrono::{Duration, NaiveDate};
use protrader_core::aggregator;
use protrader_core::domain::{ExitReason, PriceBar, PriceSeries, SignalType};
use protrader_core::features::FeatureSet;
use protrader_core::sim::{run, SimConfig};
use protrader_core::strategies::registry;
use protrader_core::strategies::trend_follower_elite::TrendFollowerElite;

fn series_from(bars: Vec<(f64, f64, f64, f64, f64)>) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars = bars
        .into_iter()
        .enumerate()
        .map(|(i, (open, high, low, close, volume))| PriceBar {
            timestamp: base + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect();
    PriceSeries::new("TEST", bars).unwrap()
}

fn flat_bars(n: usize) -> Vec<(f64, f64, f64, f64, f64)> {
    vec![(100.0, 100.0, 100.0, 100.0, 1_000_000.0); n]
}

#[test]
fn flat_market_produces_no_trades_for_any_bot() {
    let series = series_from(flat_bars(120));
    let features = FeatureSet::live()
        .with("sentiment", 0.0)
        .with("options_flow", 0.0);
    let config = SimConfig::default();

    for bot in registry() {
        let result = run(&series, bot.as_ref(), &features, &config).unwrap();
        assert!(
            result.trades.is_empty(),
            "{} traded on a flat market",
            bot.id()
        );
        assert_eq!(result.summary.final_equity, config.initial_equity);
        assert_eq!(result.summary.max_drawdown_pct, 0.0);
    }
}

#[test]
fn trend_follower_wins_in_persistent_rally() {
    // Strong steady rally: the trend follower should enter and close at
    // least one winning trade.
    let mut bars = Vec::new();
    for i in 0..140 {
        let close = 100.0 * (1.0_f64 + 0.005).powi(i);
        bars.push((close * 0.997, close * 1.004, close * 0.993, close, 1_000_000.0));
    }
    let series = series_from(bars);
    let bot = TrendFollowerElite::default_params();
    let result = run(
        &series,
        &bot,
        &FeatureSet::backtest(),
        &SimConfig::default(),
    )
    .unwrap();

    assert!(!result.trades.is_empty());
    assert!(result
        .trades
        .iter()
        .any(|t| t.exit_reason == ExitReason::TakeProfit && t.is_winner()));
    assert!(result.summary.final_equity > result.initial_equity);
}

#[test]
fn equity_curve_has_one_point_per_bar_and_moves_only_on_closes() {
    let mut bars = Vec::new();
    for i in 0..140 {
        let close = 100.0 * (1.0_f64 + 0.005).powi(i);
        bars.push((close * 0.997, close * 1.004, close * 0.993, close, 1_000_000.0));
    }
    let series = series_from(bars);
    let bot = TrendFollowerElite::default_params();
    let result = run(
        &series,
        &bot,
        &FeatureSet::backtest(),
        &SimConfig::default(),
    )
    .unwrap();

    assert_eq!(result.equity_curve.len(), series.len());
    let exit_bars: Vec<usize> = result.trades.iter().map(|t| t.exit_bar).collect();
    for pair in result.equity_curve.windows(2) {
        if pair[0].equity != pair[1].equity {
            assert!(
                exit_bars.contains(&pair[1].bar_index),
                "equity moved at bar {} without a trade close",
                pair[1].bar_index
            );
        }
    }
}

#[test]
fn aggregator_ranks_full_registry_on_live_features() {
    // Quiet range, then a high-volume hammer probing below: several bots
    // have an opinion, and the ranking must be sorted and deterministic.
    let mut bars = Vec::new();
    for i in 0..60 {
        let close = if i % 2 == 0 { 99.8 } else { 100.2 };
        bars.push((100.0, 100.6, 99.4, close, 1_000_000.0));
    }
    bars.push((99.6, 99.9, 96.0, 99.5, 4_000_000.0));
    let series = series_from(bars);
    let features = FeatureSet::live()
        .with("sentiment", 0.9)
        .with("options_flow", 0.7);
    let bots = registry();

    let signals = aggregator::generate(&series, series.len() - 1, &bots, &features).unwrap();
    assert!(!signals.is_empty());
    for pair in signals.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
    for signal in &signals {
        assert!(signal.is_risk_coherent());
        assert_ne!(signal.signal_type, SignalType::Hold);
    }

    // Deterministic: a second pass gives the same ranking.
    let again = aggregator::generate(&series, series.len() - 1, &bots, &features).unwrap();
    assert_eq!(signals, again);
}

#[test]
fn backtest_mode_without_features_errors_for_feature_bots_only() {
    let series = series_from(flat_bars(60));
    let features = FeatureSet::backtest();

    for bot in registry() {
        let outcome = bot.evaluate(&series, 59, &features);
        match bot.id() {
            "news_sentiment_trader" | "options_flow_tracker" => {
                assert!(outcome.is_err(), "{} should need a feature", bot.id())
            }
            _ => assert!(outcome.is_ok(), "{} failed unexpectedly", bot.id()),
        }
    }
}
