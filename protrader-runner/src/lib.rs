//! ProTrader Runner — backtest orchestration on top of `protrader-core`.
//!
//! This crate owns everything around the engine:
//! - Data loading (CSV) and deterministic synthetic series generation
//! - Run fingerprinting for stable result identification
//! - The per-bot performance ledger, updated from completed runs
//! - Parallel batch execution over (bot × symbol) combinations
//! - Export records matching the documented JSON API shapes
//! - The tick-feed boundary used by the real-time transport

pub mod batch;
pub mod data;
pub mod export;
pub mod feed;
pub mod fingerprint;
pub mod ledger;

pub use batch::{run_batch, BatchReport, RunOutcome};
pub use data::{load_csv, synthetic_series, DataError};
pub use export::{BacktestRecord, SignalRecord, TradeRecord};
pub use feed::{MarketUpdate, PriceTick, TickFeed};
pub use fingerprint::{run_id, RunId};
pub use ledger::{BotPerformance, PerformanceLedger};
