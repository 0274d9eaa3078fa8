//! Rolling extremes and clustered support/resistance levels.

use super::window;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// Highest high of the `lookback` bars strictly before `index`.
///
/// The current bar is excluded so a close above the returned level is a
/// genuine breakout rather than a comparison against the bar's own high.
pub fn rolling_high(
    series: &PriceSeries,
    index: usize,
    lookback: usize,
) -> Result<f64, IndicatorError> {
    assert!(lookback >= 1, "range lookback must be >= 1");
    let bars = window(series, index, lookback + 1)?;
    Ok(bars[..lookback]
        .iter()
        .map(|b| b.high)
        .fold(f64::NEG_INFINITY, f64::max))
}

/// Lowest low of the `lookback` bars strictly before `index`.
pub fn rolling_low(
    series: &PriceSeries,
    index: usize,
    lookback: usize,
) -> Result<f64, IndicatorError> {
    assert!(lookback >= 1, "range lookback must be >= 1");
    let bars = window(series, index, lookback + 1)?;
    Ok(bars[..lookback]
        .iter()
        .map(|b| b.low)
        .fold(f64::INFINITY, f64::min))
}

/// Clustered support/resistance levels from local extrema in the `lookback`
/// bars before `index`.
///
/// A bar is a pivot high when its high is >= both neighbors' highs, a pivot
/// low when its low is <= both neighbors' lows. Pivot prices within
/// `tolerance` (relative) of a cluster are merged; each cluster contributes
/// its mean price. Levels are returned in ascending order.
pub fn support_resistance_levels(
    series: &PriceSeries,
    index: usize,
    lookback: usize,
    tolerance: f64,
) -> Result<Vec<f64>, IndicatorError> {
    assert!(lookback >= 3, "cluster lookback must be >= 3");
    assert!(tolerance > 0.0, "cluster tolerance must be > 0");
    let bars = window(series, index, lookback + 1)?;
    let bars = &bars[..lookback];

    let mut pivots: Vec<f64> = Vec::new();
    for j in 1..bars.len() - 1 {
        if bars[j].high >= bars[j - 1].high && bars[j].high >= bars[j + 1].high {
            pivots.push(bars[j].high);
        }
        if bars[j].low <= bars[j - 1].low && bars[j].low <= bars[j + 1].low {
            pivots.push(bars[j].low);
        }
    }
    pivots.sort_by(|a, b| a.total_cmp(b));

    let mut levels = Vec::new();
    let mut cluster: Vec<f64> = Vec::new();
    for price in pivots {
        match cluster.first() {
            Some(&anchor) if (price - anchor) / anchor <= tolerance => cluster.push(price),
            Some(_) => {
                levels.push(cluster.iter().sum::<f64>() / cluster.len() as f64);
                cluster = vec![price];
            }
            None => cluster.push(price),
        }
    }
    if !cluster.is_empty() {
        levels.push(cluster.iter().sum::<f64>() / cluster.len() as f64);
    }
    Ok(levels)
}

/// The level closest to `price` with its relative distance, or `None` for an
/// empty level set.
pub fn nearest_level(levels: &[f64], price: f64) -> Option<(f64, f64)> {
    levels
        .iter()
        .map(|&level| (level, (price - level).abs() / price))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
