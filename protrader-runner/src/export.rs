//! JSON API shapes for signals and backtest results.
//!
//! These records mirror the documented wire format consumed by terminal
//! frontends. Monetary values are rounded to two decimals here and only
//! here; everything upstream stays at full precision.

use chrono::NaiveDateTime;
use protrader_core::domain::{BacktestResult, Signal, Trade};
use serde::{Deserialize, Serialize};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn iso(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// One ranked signal, as published to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub bot: String,
    pub bot_id: String,
    #[serde(rename = "type")]
    pub signal_type: String,
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub reason: String,
    pub timestamp: String,
}

impl SignalRecord {
    pub fn from_signal(signal: &Signal, bot_name: &str) -> Self {
        Self {
            bot: bot_name.to_string(),
            bot_id: signal.strategy_id.clone(),
            signal_type: signal.signal_type.as_str().to_string(),
            confidence: round2(signal.confidence),
            entry_price: round2(signal.entry_price),
            stop_loss: round2(signal.stop_loss),
            take_profit: round2(signal.take_profit),
            reason: signal.reason.clone(),
            timestamp: iso(signal.timestamp),
        }
    }
}

/// One closed trade inside a backtest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub entry_bar: usize,
    pub exit_bar: usize,
    pub direction: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub exit_reason: String,
    pub pnl: f64,
    pub pnl_percent: f64,
}

impl TradeRecord {
    fn from_trade(trade: &Trade) -> Self {
        Self {
            entry_bar: trade.entry_bar,
            exit_bar: trade.exit_bar,
            direction: match trade.direction {
                protrader_core::domain::Direction::Long => "long".to_string(),
                protrader_core::domain::Direction::Short => "short".to_string(),
            },
            entry_price: round2(trade.entry_price),
            exit_price: round2(trade.exit_price),
            exit_reason: match trade.exit_reason {
                protrader_core::domain::ExitReason::StopLoss => "stop_loss".to_string(),
                protrader_core::domain::ExitReason::TakeProfit => "take_profit".to_string(),
                protrader_core::domain::ExitReason::ForcedClose => "forced_close".to_string(),
            },
            pnl: round2(trade.pnl),
            pnl_percent: round2(trade.pnl_pct),
        }
    }
}

/// Complete backtest response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRecord {
    pub bot: String,
    pub symbol: String,
    pub period_days: usize,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub win_rate: f64,
    pub total_return_pct: f64,
    pub final_equity: f64,
    pub max_drawdown_pct: f64,
    pub trades: Vec<TradeRecord>,
    pub equity_curve: Vec<f64>,
}

impl BacktestRecord {
    pub fn from_result(result: &BacktestResult, bot_name: &str) -> Self {
        Self {
            bot: bot_name.to_string(),
            symbol: result.symbol.clone(),
            period_days: result.period.bars,
            total_trades: result.summary.total_trades,
            winning_trades: result.summary.winning_trades,
            win_rate: round2(result.summary.win_rate),
            total_return_pct: round2(result.summary.total_return_pct),
            final_equity: round2(result.summary.final_equity),
            max_drawdown_pct: round2(result.summary.max_drawdown_pct),
            trades: result.trades.iter().map(TradeRecord::from_trade).collect(),
            equity_curve: result
                .equity_curve
                .iter()
                .map(|p| round2(p.equity))
                .collect(),
        }
    }
}
