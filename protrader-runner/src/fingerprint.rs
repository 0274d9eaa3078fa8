//! Run fingerprinting — a stable identity for one backtest run.
//!
//! The id hashes everything that determines the result: bot, symbol,
//! simulation parameters, and the simulated window. Re-running the same
//! configuration over the same data yields the same `RunId`.

use protrader_core::domain::BacktestPeriod;
use protrader_core::sim::SimConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex-encoded blake3 fingerprint of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for logs and tables.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint a run from its identifying inputs.
///
/// The canonical form is a flat `|`-separated string; field order is part
/// of the format and must not change between releases.
pub fn run_id(
    strategy_id: &str,
    symbol: &str,
    config: &SimConfig,
    period: &BacktestPeriod,
) -> RunId {
    let canonical = format!(
        "{strategy_id}|{symbol}|{:.6}|{:.6}|{}|{}|{}",
        config.initial_equity, config.risk_per_trade, period.start, period.end, period.bars,
    );
    RunId(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(days: usize) -> BacktestPeriod {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        BacktestPeriod {
            start,
            end: start + chrono::Duration::days(days as i64 - 1),
            bars: days,
        }
    }

    #[test]
    fn same_inputs_same_id() {
        let config = SimConfig::default();
        let a = run_id("wick_master_pro", "AAPL", &config, &period(100));
        let b = run_id("wick_master_pro", "AAPL", &config, &period(100));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn any_input_change_changes_the_id() {
        let config = SimConfig::default();
        let base = run_id("wick_master_pro", "AAPL", &config, &period(100));

        assert_ne!(base, run_id("macd_master", "AAPL", &config, &period(100)));
        assert_ne!(base, run_id("wick_master_pro", "TSLA", &config, &period(100)));
        assert_ne!(base, run_id("wick_master_pro", "AAPL", &config, &period(101)));

        let risky = SimConfig {
            risk_per_trade: 0.05,
            ..SimConfig::default()
        };
        assert_ne!(base, run_id("wick_master_pro", "AAPL", &risky, &period(100)));
    }

    #[test]
    fn short_form_is_a_prefix() {
        let id = run_id("wick_master_pro", "AAPL", &SimConfig::default(), &period(10));
        assert!(id.as_str().starts_with(id.short()));
        assert_eq!(id.short().len(), 12);
    }
}
