//! Bar-by-bar backtest simulator.
//!
//! A strictly sequential replay: one strategy, one series, a Flat/InPosition
//! state machine. Entries come from the strategy's own signals; exits come
//! from the bar range crossing the position's stop or target, with the stop
//! taking precedence when one bar crosses both. Parallelism belongs to the
//! batch layer above, never inside a run.

use crate::domain::{
    BacktestPeriod, BacktestResult, Direction, EquityPoint, Position, PriceSeries, SignalType,
    Trade,
};
use crate::error::{BacktestError, ConfigError, SeriesError};
use crate::features::FeatureSet;
use crate::indicators::EPSILON;
use crate::strategies::Strategy;
use crate::summary::summarize;
use serde::{Deserialize, Serialize};

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub initial_equity: f64,
    /// Fraction of current equity risked per trade (distance to the stop).
    pub risk_per_trade: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_equity: 10_000.0,
            risk_per_trade: 0.02,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_equity > 0.0) {
            return Err(ConfigError::new("sim", "initial_equity", "must be > 0"));
        }
        if !(self.risk_per_trade > 0.0 && self.risk_per_trade <= 1.0) {
            return Err(ConfigError::new("sim", "risk_per_trade", "must be in (0, 1]"));
        }
        Ok(())
    }
}

enum State {
    Flat,
    InPosition(Position),
}

/// Replay `strategy` over the whole series.
///
/// The equity curve carries exactly one point per bar; equity moves only
/// when a trade closes. Any position still open at the last bar is closed
/// at that bar's close, so no unrealized PnL survives a run.
pub fn run(
    series: &PriceSeries,
    strategy: &dyn Strategy,
    features: &FeatureSet,
    config: &SimConfig,
) -> Result<BacktestResult, BacktestError> {
    config.validate()?;
    if series.is_empty() {
        return Err(SeriesError::Empty.into());
    }

    let len = series.len();
    let last = len - 1;
    let start = strategy.min_lookback();

    let mut state = State::Flat;
    let mut equity = config.initial_equity;
    let mut trades: Vec<Trade> = Vec::new();
    let mut curve: Vec<EquityPoint> = Vec::with_capacity(len);

    for index in 0..len {
        let bar = series
            .bar(index)
            .expect("index bounded by series length");
        // Tracks whether a position closed on this bar: the bar that closes
        // a trade never also opens the next one.
        let mut closed_this_bar = false;

        if let State::InPosition(pos) = &state {
            debug_assert!(index > pos.entry_bar);
            let exit = match pos.direction {
                Direction::Long => {
                    if bar.low <= pos.stop_loss {
                        Some((pos.stop_loss, crate::domain::ExitReason::StopLoss))
                    } else if bar.high >= pos.take_profit {
                        Some((pos.take_profit, crate::domain::ExitReason::TakeProfit))
                    } else {
                        None
                    }
                }
                Direction::Short => {
                    if bar.high >= pos.stop_loss {
                        Some((pos.stop_loss, crate::domain::ExitReason::StopLoss))
                    } else if bar.low <= pos.take_profit {
                        Some((pos.take_profit, crate::domain::ExitReason::TakeProfit))
                    } else {
                        None
                    }
                }
            };
            let exit = exit.or(if index == last {
                Some((bar.close, crate::domain::ExitReason::ForcedClose))
            } else {
                None
            });

            if let Some((exit_price, exit_reason)) = exit {
                let trade = close_position(pos, index, exit_price, exit_reason);
                equity += trade.pnl;
                trades.push(trade);
                state = State::Flat;
                closed_this_bar = true;
            }
        }

        if matches!(state, State::Flat) && !closed_this_bar && index >= start && index < last {
            if let Some(signal) = strategy.evaluate(series, index, features)? {
                let direction = match signal.signal_type {
                    SignalType::Buy => Some(Direction::Long),
                    SignalType::Sell => Some(Direction::Short),
                    SignalType::Hold => None,
                };
                if let Some(direction) = direction {
                    let risk_per_unit = (signal.entry_price - signal.stop_loss).abs();
                    // A stop sitting on the entry price would make sizing
                    // divide by zero; skip the entry instead.
                    if risk_per_unit > EPSILON {
                        let size = equity * config.risk_per_trade / risk_per_unit;
                        state = State::InPosition(Position {
                            entry_bar: index,
                            entry_price: signal.entry_price,
                            stop_loss: signal.stop_loss,
                            take_profit: signal.take_profit,
                            direction,
                            size,
                        });
                    }
                }
            }
        }

        curve.push(EquityPoint {
            bar_index: index,
            equity,
        });
    }

    let first_bar = series.bar(0).expect("non-empty series");
    let last_bar = series.bar(last).expect("non-empty series");
    let summary = summarize(&trades, &curve, config.initial_equity);

    Ok(BacktestResult {
        strategy_id: strategy.id().to_string(),
        symbol: series.symbol().to_string(),
        period: BacktestPeriod {
            start: first_bar.timestamp,
            end: last_bar.timestamp,
            bars: len,
        },
        initial_equity: config.initial_equity,
        trades,
        equity_curve: curve,
        summary,
    })
}

fn close_position(
    pos: &Position,
    exit_bar: usize,
    exit_price: f64,
    exit_reason: crate::domain::ExitReason,
) -> Trade {
    let sign = pos.direction.sign();
    let pnl = (exit_price - pos.entry_price) * pos.size * sign;
    let pnl_pct = pnl / (pos.entry_price * pos.size) * 100.0;
    Trade {
        entry_bar: pos.entry_bar,
        entry_price: pos.entry_price,
        exit_bar,
        exit_price,
        exit_reason,
        stop_loss: pos.stop_loss,
        take_profit: pos.take_profit,
        direction: pos.direction,
        size: pos.size,
        pnl,
        pnl_pct,
    }
}
