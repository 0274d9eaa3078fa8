//! Trade — a closed position record, appended to the ledger in order.

use super::position::Direction;
use serde::{Deserialize, Serialize};

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    /// Closed at the last bar's close because the series ended. A backtest
    /// never finishes with an unrealized position.
    ForcedClose,
}

/// A completed round-trip trade: entry to exit.
///
/// Immutable once created. `pnl` and `pnl_pct` are stored at full precision;
/// rounding happens only at the export boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_bar: usize,
    pub entry_price: f64,
    pub exit_bar: usize,
    pub exit_price: f64,
    pub exit_reason: ExitReason,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub direction: Direction,
    pub size: f64,
    pub pnl: f64,
    pub pnl_pct: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    pub fn bars_held(&self) -> usize {
        self.exit_bar - self.entry_bar
    }
}
