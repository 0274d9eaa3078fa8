//! Performance statistics derived from a completed trade ledger.

use crate::domain::{EquityPoint, Trade};
use serde::{Deserialize, Serialize};

/// Headline statistics of one backtest run.
///
/// Percentages are in percent units (win_rate 55.0 means 55%); drawdown is
/// reported as a negative number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub win_rate: f64,
    pub total_return_pct: f64,
    pub final_equity: f64,
    pub max_drawdown_pct: f64,
}

/// Recompute the summary from the ledger and curve.
///
/// Pure and total: a run with no trades yields zeros rather than NaN, and an
/// empty curve falls back to the initial equity.
pub fn summarize(trades: &[Trade], equity_curve: &[EquityPoint], initial_equity: f64) -> Summary {
    let total_trades = trades.len();
    let winning_trades = trades.iter().filter(|t| t.is_winner()).count();
    let win_rate = if total_trades == 0 {
        0.0
    } else {
        winning_trades as f64 / total_trades as f64 * 100.0
    };

    let final_equity = equity_curve
        .last()
        .map(|p| p.equity)
        .unwrap_or(initial_equity);
    let total_return_pct = if initial_equity > 0.0 {
        (final_equity - initial_equity) / initial_equity * 100.0
    } else {
        0.0
    };

    Summary {
        total_trades,
        winning_trades,
        win_rate,
        total_return_pct,
        final_equity,
        max_drawdown_pct: max_drawdown_pct(equity_curve),
    }
}

/// Largest peak-to-trough decline along the curve, as a negative percent.
/// Zero for a flat or monotonically rising curve.
fn max_drawdown_pct(curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0f64;
    for point in curve {
        peak = peak.max(point.equity);
        if peak > 0.0 {
            let dd = (point.equity - peak) / peak * 100.0;
            worst = worst.min(dd);
        }
    }
    worst
}
