//! PriceBar and PriceSeries — the fundamental market data units.

use crate::error::SeriesError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One OHLCV observation for a fixed time interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// Basic OHLCV sanity check: finite values, high >= low, the body
    /// contained in the range, non-negative volume.
    pub fn is_sane(&self) -> bool {
        let finite = self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite();
        finite
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
            && self.volume >= 0.0
    }

    /// High-low range of the bar.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Absolute open-close body of the bar.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }
}

/// Ordered, validated sequence of bars for one symbol.
///
/// Invariants enforced at construction and on every append:
/// timestamps strictly increasing (no duplicates), every bar sane.
/// Bars are immutable once recorded; the core never mutates or reorders
/// data it receives from the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from pre-collected bars, validating every invariant.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        let mut series = Self::empty(symbol);
        for bar in bars {
            series.push(bar)?;
        }
        Ok(series)
    }

    /// An empty series, ready to receive live appends.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    /// Append one bar, enforcing chronology and sanity.
    pub fn push(&mut self, bar: PriceBar) -> Result<(), SeriesError> {
        let index = self.bars.len();
        if !bar.is_sane() {
            return Err(SeriesError::MalformedBar { index });
        }
        if let Some(last) = self.bars.last() {
            if bar.timestamp <= last.timestamp {
                return Err(SeriesError::NonChronological { index });
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bar(&self, index: usize) -> Option<&PriceBar> {
        self.bars.get(index)
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}
