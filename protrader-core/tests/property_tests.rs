//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Strategy purity — evaluating the same bar twice gives identical output
//! 2. Ledger ordering — trades never overlap and always exit after entry
//! 3. Equity accounting — the curve ends where the trade PnLs say it must
//! 4. Summary bounds — win rate stays in [0, 100], drawdown is never positive

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use protrader_core::domain::{PriceBar, PriceSeries};
use protrader_core::features::FeatureSet;
use protrader_core::sim::{run, SimConfig};
use protrader_core::strategies::registry;
use protrader_core::summary::summarize;

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random-walk OHLCV series: positive prices, sane bars, strictly ordered
/// daily timestamps.
fn arb_series() -> impl Strategy<Value = PriceSeries> {
    (
        50.0..500.0_f64,
        prop::collection::vec((-0.03..0.03_f64, 0.0..0.02_f64, 0.5..3.0_f64), 60..160),
    )
        .prop_map(|(start, steps)| {
            let base = NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let mut price = start;
            let bars = steps
                .iter()
                .enumerate()
                .map(|(i, &(drift, spread, vol_mult))| {
                    let open = price;
                    let close = (price * (1.0 + drift)).max(1.0);
                    let high = open.max(close) * (1.0 + spread);
                    let low = (open.min(close) * (1.0 - spread)).max(0.5);
                    price = close;
                    PriceBar {
                        timestamp: base + Duration::days(i as i64),
                        open,
                        high,
                        low,
                        close,
                        volume: 1_000_000.0 * vol_mult,
                    }
                })
                .collect();
            PriceSeries::new("PROP", bars).expect("generated bars are valid")
        })
}

fn full_features() -> FeatureSet {
    FeatureSet::live()
        .with("sentiment", 0.7)
        .with("options_flow", 0.6)
}

// ── 1. Purity ────────────────────────────────────────────────────────

proptest! {
    /// Two evaluations of one bot at one bar are identical.
    #[test]
    fn strategy_evaluation_is_pure(series in arb_series()) {
        let features = full_features();
        let index = series.len() - 1;
        for bot in registry() {
            let first = bot.evaluate(&series, index, &features).unwrap();
            let second = bot.evaluate(&series, index, &features).unwrap();
            prop_assert_eq!(first, second, "{} is not pure", bot.id());
        }
    }
}

// ── 2 + 3. Simulator ledger and accounting ───────────────────────────

proptest! {
    /// For every bot: trades are ordered, non-overlapping, and the equity
    /// curve is consistent with the ledger.
    #[test]
    fn simulator_ledger_invariants(series in arb_series()) {
        let config = SimConfig::default();
        let features = full_features();
        for bot in registry() {
            let result = run(&series, bot.as_ref(), &features, &config).unwrap();

            prop_assert_eq!(result.equity_curve.len(), series.len());

            let mut previous_exit = 0usize;
            for trade in &result.trades {
                prop_assert!(trade.exit_bar > trade.entry_bar);
                prop_assert!(trade.entry_bar >= previous_exit);
                prop_assert!(trade.size > 0.0);
                previous_exit = trade.exit_bar;
            }

            let pnl_sum: f64 = result.trades.iter().map(|t| t.pnl).sum();
            let final_equity = result.equity_curve.last().unwrap().equity;
            prop_assert!((final_equity - (config.initial_equity + pnl_sum)).abs() < 1e-6);
        }
    }
}

// ── 4. Summary bounds ────────────────────────────────────────────────

proptest! {
    #[test]
    fn summary_stays_in_bounds(series in arb_series()) {
        let config = SimConfig::default();
        let features = full_features();
        for bot in registry() {
            let result = run(&series, bot.as_ref(), &features, &config).unwrap();
            let summary = result.summary;

            prop_assert!((0.0..=100.0).contains(&summary.win_rate));
            prop_assert!(summary.max_drawdown_pct <= 0.0);
            prop_assert!(summary.winning_trades <= summary.total_trades);
            prop_assert!(summary.final_equity.is_finite());

            // The summary is recomputable from its inputs.
            let recomputed = summarize(
                &result.trades,
                &result.equity_curve,
                result.initial_equity,
            );
            prop_assert_eq!(summary, recomputed);
        }
    }
}
