//! Simulated positions — simulation-only state, never persisted.

use serde::{Deserialize, Serialize};

/// Side of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// PnL sign: +1 for long, -1 for short.
    pub fn sign(&self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

/// An open simulated position.
///
/// Created when the simulator accepts a buy/sell signal while flat; at most
/// one exists per run (no pyramiding). Closed by stop, target, or forced
/// close at series end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub entry_bar: usize,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub direction: Direction,
    pub size: f64,
}
