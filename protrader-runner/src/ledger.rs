//! Per-bot performance ledger.
//!
//! Aggregates are an explicit store updated only from completed backtest
//! results, never mutated from inside strategy evaluation. Parallel batches
//! therefore stay race-free: workers produce results, the merge happens
//! sequentially afterwards.

use protrader_core::domain::BacktestResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifetime aggregate for one bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BotPerformance {
    pub total_signals: usize,
    pub winning_signals: usize,
    pub total_pnl: f64,
}

impl BotPerformance {
    pub fn win_rate(&self) -> f64 {
        if self.total_signals == 0 {
            0.0
        } else {
            self.winning_signals as f64 / self.total_signals as f64 * 100.0
        }
    }
}

/// Aggregate store keyed by strategy id, deterministic iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceLedger {
    entries: BTreeMap<String, BotPerformance>,
}

impl PerformanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed run into the ledger.
    pub fn record(&mut self, result: &BacktestResult) {
        let entry = self
            .entries
            .entry(result.strategy_id.clone())
            .or_default();
        entry.total_signals += result.trades.len();
        entry.winning_signals += result.trades.iter().filter(|t| t.is_winner()).count();
        entry.total_pnl += result.trades.iter().map(|t| t.pnl).sum::<f64>();
    }

    pub fn get(&self, strategy_id: &str) -> Option<&BotPerformance> {
        self.entries.get(strategy_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BotPerformance)> {
        self.entries.iter().map(|(id, perf)| (id.as_str(), perf))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use protrader_core::domain::{
        BacktestPeriod, Direction, EquityPoint, ExitReason, Trade,
    };
    use protrader_core::summary::summarize;

    fn result_with_pnls(strategy_id: &str, pnls: &[f64]) -> BacktestResult {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let trades: Vec<Trade> = pnls
            .iter()
            .enumerate()
            .map(|(i, &pnl)| Trade {
                entry_bar: i * 2,
                entry_price: 100.0,
                exit_bar: i * 2 + 1,
                exit_price: 100.0 + pnl,
                exit_reason: ExitReason::ForcedClose,
                stop_loss: 98.0,
                take_profit: 104.0,
                direction: Direction::Long,
                size: 1.0,
                pnl,
                pnl_pct: pnl,
            })
            .collect();
        let curve = vec![EquityPoint {
            bar_index: 0,
            equity: 10_000.0 + pnls.iter().sum::<f64>(),
        }];
        let summary = summarize(&trades, &curve, 10_000.0);
        BacktestResult {
            strategy_id: strategy_id.to_string(),
            symbol: "TEST".to_string(),
            period: BacktestPeriod {
                start,
                end: start,
                bars: 1,
            },
            initial_equity: 10_000.0,
            trades,
            equity_curve: curve,
            summary,
        }
    }

    #[test]
    fn record_accumulates_across_runs() {
        let mut ledger = PerformanceLedger::new();
        ledger.record(&result_with_pnls("macd_master", &[50.0, -20.0]));
        ledger.record(&result_with_pnls("macd_master", &[30.0]));

        let perf = ledger.get("macd_master").unwrap();
        assert_eq!(perf.total_signals, 3);
        assert_eq!(perf.winning_signals, 2);
        assert!((perf.total_pnl - 60.0).abs() < 1e-9);
        assert!((perf.win_rate() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ledger_keys_iterate_in_sorted_order() {
        let mut ledger = PerformanceLedger::new();
        ledger.record(&result_with_pnls("wick_master_pro", &[1.0]));
        ledger.record(&result_with_pnls("breakout_hunter", &[1.0]));
        ledger.record(&result_with_pnls("macd_master", &[1.0]));

        let ids: Vec<&str> = ledger.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["breakout_hunter", "macd_master", "wick_master_pro"]);
    }

    #[test]
    fn empty_bot_win_rate_is_zero() {
        assert_eq!(BotPerformance::default().win_rate(), 0.0);
    }
}
