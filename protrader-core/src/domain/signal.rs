//! Trade signals emitted by strategy bots.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Discrete decision of a bot at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
        }
    }
}

/// An actionable signal: direction, conviction, and risk levels.
///
/// Immutable once emitted. Bots never emit a signal whose confidence is
/// below their configured threshold — they return none instead — so every
/// `Signal` a consumer sees is actionable by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub strategy_id: String,
    pub symbol: String,
    pub signal_type: SignalType,
    /// Conviction in [0, 1].
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Human-readable rationale, e.g. "Oversold - RSI 24.1, below lower band".
    pub reason: String,
    /// Timestamp of the bar the signal was computed from (never wall-clock,
    /// so replays are deterministic).
    pub timestamp: NaiveDateTime,
}

impl Signal {
    /// Risk-level coherence: stop below entry below target for buys, the
    /// reverse for sells. Hold signals carry no risk levels and are vacuously
    /// coherent.
    pub fn is_risk_coherent(&self) -> bool {
        match self.signal_type {
            SignalType::Buy => {
                self.stop_loss < self.entry_price && self.entry_price < self.take_profit
            }
            SignalType::Sell => {
                self.take_profit < self.entry_price && self.entry_price < self.stop_loss
            }
            SignalType::Hold => true,
        }
    }
}
