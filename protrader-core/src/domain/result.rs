//! BacktestResult — the complete, read-only output of one simulation run.

use super::trade::Trade;
use crate::summary::Summary;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One point of the equity curve. The curve has exactly one point per
/// simulated bar; equity only moves on trade closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub bar_index: usize,
    pub equity: f64,
}

/// The simulated window of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub bars: usize,
}

/// Output of one backtest run: ledger, curve, and derived statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub strategy_id: String,
    pub symbol: String,
    pub period: BacktestPeriod,
    pub initial_equity: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub summary: Summary,
}
