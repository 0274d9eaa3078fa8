//! ProTrader Core — strategy evaluation and backtesting engine.
//!
//! This crate contains the algorithmic heart of the platform:
//! - Domain types (price bars, series, signals, positions, trades)
//! - Pure indicator functions (wick ratio, volume ratio, MA/MACD/RSI,
//!   Bollinger, support/resistance, Fibonacci, candlestick patterns)
//! - Fifteen strategy bots behind a single `Strategy` trait
//! - Signal aggregation across bots with deterministic ordering
//! - Bar-by-bar backtest simulator (Flat/InPosition state machine)
//! - Performance summarization (win rate, return, drawdown)
//!
//! No I/O lives here: the market-data feed and transport layers hand the
//! core materialized series and consume plain serializable results.

pub mod aggregator;
pub mod domain;
pub mod error;
pub mod features;
pub mod indicators;
pub mod sim;
pub mod strategies;
pub mod summary;
