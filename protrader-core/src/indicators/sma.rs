//! Simple Moving Average over closing prices.

use super::window;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// Mean of the `period` closes ending at `index`.
pub fn sma(series: &PriceSeries, index: usize, period: usize) -> Result<f64, IndicatorError> {
    assert!(period >= 1, "SMA period must be >= 1");
    let bars = window(series, index, period)?;
    Ok(bars.iter().map(|b| b.close).sum::<f64>() / period as f64)
}
