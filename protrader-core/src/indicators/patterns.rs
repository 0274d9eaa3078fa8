//! Candlestick pattern scores.
//!
//! Scores are deterministic functions of bar geometry in [0, 1]; 0 means the
//! pattern is absent. Engulfing checks are boolean two-bar comparisons.

use super::{bar_at, window, EPSILON};
use crate::domain::{PriceBar, PriceSeries};
use crate::error::IndicatorError;

fn fractions(bar: &PriceBar) -> Option<(f64, f64, f64)> {
    let range = bar.range();
    if range < EPSILON {
        return None;
    }
    let body = bar.body() / range;
    let lower = (bar.open.min(bar.close) - bar.low) / range;
    let upper = (bar.high - bar.open.max(bar.close)) / range;
    Some((body, lower, upper))
}

/// Hammer score at `index`: long lower wick, small body, little upper wick.
pub fn hammer_score(series: &PriceSeries, index: usize) -> Result<f64, IndicatorError> {
    let bar = bar_at(series, index)?;
    let Some((body, lower, upper)) = fractions(bar) else {
        return Ok(0.0);
    };
    Ok((2.0 * lower - body - upper).clamp(0.0, 1.0))
}

/// Shooting-star score at `index`: the hammer mirrored.
pub fn shooting_star_score(series: &PriceSeries, index: usize) -> Result<f64, IndicatorError> {
    let bar = bar_at(series, index)?;
    let Some((body, lower, upper)) = fractions(bar) else {
        return Ok(0.0);
    };
    Ok((2.0 * upper - body - lower).clamp(0.0, 1.0))
}

/// Bullish engulfing at `index`: previous bar bearish, current bar bullish,
/// current body containing the previous body.
pub fn bullish_engulfing(series: &PriceSeries, index: usize) -> Result<bool, IndicatorError> {
    let bars = window(series, index, 2)?;
    let (prev, cur) = (&bars[0], &bars[1]);
    Ok(prev.close < prev.open
        && cur.close > cur.open
        && cur.open <= prev.close
        && cur.close >= prev.open)
}

/// Bearish engulfing at `index`: the bullish case mirrored.
pub fn bearish_engulfing(series: &PriceSeries, index: usize) -> Result<bool, IndicatorError> {
    let bars = window(series, index, 2)?;
    let (prev, cur) = (&bars[0], &bars[1]);
    Ok(prev.close > prev.open
        && cur.close < cur.open
        && cur.open >= prev.close
        && cur.close <= prev.open)
}
