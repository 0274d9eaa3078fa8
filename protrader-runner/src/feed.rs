//! The real-time boundary: ticks in, series and push messages out.
//!
//! Transport (websockets, message buses) stays outside this crate. The feed
//! only folds incoming ticks into validated per-symbol series and shapes the
//! `market_update` message the transport republishes.

use chrono::NaiveDateTime;
use protrader_core::domain::{PriceBar, PriceSeries};
use protrader_core::error::SeriesError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One incoming price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub volume: f64,
}

/// The serializable push message for clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketUpdate {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub prices: BTreeMap<String, f64>,
}

/// Folds ticks into per-symbol append-only series.
///
/// Each tick becomes a degenerate bar (open = high = low = close); series
/// validation still applies, so out-of-order ticks are rejected rather than
/// silently reordered.
#[derive(Debug, Default)]
pub struct TickFeed {
    series: BTreeMap<String, PriceSeries>,
}

impl TickFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, tick: &PriceTick) -> Result<(), SeriesError> {
        let series = self
            .series
            .entry(tick.symbol.clone())
            .or_insert_with(|| PriceSeries::empty(tick.symbol.clone()));
        series.push(PriceBar {
            timestamp: tick.timestamp,
            open: tick.price,
            high: tick.price,
            low: tick.price,
            close: tick.price,
            volume: tick.volume,
        })
    }

    pub fn series(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Current `market_update` snapshot: last price per symbol.
    pub fn snapshot(&self, timestamp: NaiveDateTime) -> MarketUpdate {
        let prices = self
            .series
            .iter()
            .filter_map(|(symbol, series)| {
                series.last().map(|bar| (symbol.clone(), bar.close))
            })
            .collect();
        MarketUpdate {
            kind: "market_update".to_string(),
            timestamp: timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            prices,
        }
    }
}
