//! Domain types for the trading engine.

pub mod bar;
pub mod position;
pub mod result;
pub mod signal;
pub mod trade;

pub use bar::{PriceBar, PriceSeries};
pub use position::{Direction, Position};
pub use result::{BacktestPeriod, BacktestResult, EquityPoint};
pub use signal::{Signal, SignalType};
pub use trade::{ExitReason, Trade};

/// Symbol type alias.
pub type Symbol = String;
