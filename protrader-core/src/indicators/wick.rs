//! Wick ratios — rejection-wick length relative to the bar body.
//!
//! The wick is the part of the high-low range outside the open-close body.
//! A long lower wick with a small body is a bullish rejection; a long upper
//! wick the bearish mirror. Bodies near zero are epsilon-guarded.

use super::{bar_at, EPSILON};
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// (close - low) / max(|close - open|, epsilon) at `index`.
pub fn lower_wick_ratio(series: &PriceSeries, index: usize) -> Result<f64, IndicatorError> {
    let bar = bar_at(series, index)?;
    Ok((bar.close - bar.low) / bar.body().max(EPSILON))
}

/// (high - close) / max(|close - open|, epsilon) at `index`.
pub fn upper_wick_ratio(series: &PriceSeries, index: usize) -> Result<f64, IndicatorError> {
    let bar = bar_at(series, index)?;
    Ok((bar.high - bar.close) / bar.body().max(EPSILON))
}

/// Where the close sits in the bar's range: 0 at the low, 1 at the high.
/// A zero-range bar reads as neutral 0.5.
pub fn range_position(series: &PriceSeries, index: usize) -> Result<f64, IndicatorError> {
    let bar = bar_at(series, index)?;
    let range = bar.range();
    if range < EPSILON {
        return Ok(0.5);
    }
    Ok((bar.close - bar.low) / range)
}
