//! Fibonacci retracement levels from the lookback swing high/low.

use super::window;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// The standard retracement ratios, shallow to deep.
pub const KEY_RATIOS: [f64; 5] = [0.236, 0.382, 0.500, 0.618, 0.786];

/// Retracement levels for one lookback window.
#[derive(Debug, Clone, PartialEq)]
pub struct FibLevels {
    pub high: f64,
    pub low: f64,
    /// (ratio, price) pairs; price = high - (high - low) * ratio.
    pub levels: Vec<(f64, f64)>,
}

impl FibLevels {
    /// The ratio whose level is within `tolerance` (relative to `price`) of
    /// `price`, picking the closest when several qualify.
    pub fn nearest(&self, price: f64, tolerance: f64) -> Option<f64> {
        self.levels
            .iter()
            .map(|&(ratio, level)| (ratio, (price - level).abs() / price))
            .filter(|&(_, dist)| dist < tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(ratio, _)| ratio)
    }
}

/// Levels from the swing high/low of the `lookback` bars ending at `index`.
pub fn fibonacci_levels(
    series: &PriceSeries,
    index: usize,
    lookback: usize,
) -> Result<FibLevels, IndicatorError> {
    assert!(lookback >= 2, "Fibonacci lookback must be >= 2");
    let bars = window(series, index, lookback)?;

    let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let diff = high - low;

    let levels = KEY_RATIOS
        .iter()
        .map(|&ratio| (ratio, high - diff * ratio))
        .collect();

    Ok(FibLevels { high, low, levels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn levels_span_high_to_low() {
        let series = make_series(&[100.0, 120.0, 110.0, 105.0]);
        let fib = fibonacci_levels(&series, 3, 4).unwrap();
        // make_series pads highs by +1 and lows by -1.
        assert_approx(fib.high, 121.0, DEFAULT_EPSILON);
        assert_approx(fib.low, 99.0, DEFAULT_EPSILON);

        let half = fib
            .levels
            .iter()
            .find(|(r, _)| (*r - 0.5).abs() < 1e-12)
            .unwrap()
            .1;
        assert_approx(half, 110.0, DEFAULT_EPSILON);
    }

    #[test]
    fn nearest_matches_within_tolerance() {
        let series = make_series(&[100.0, 120.0, 110.0, 105.0]);
        let fib = fibonacci_levels(&series, 3, 4).unwrap();
        // The 0.5 level sits at 110.0.
        assert_eq!(fib.nearest(110.2, 0.005), Some(0.5));
        assert_eq!(fib.nearest(130.0, 0.005), None);
    }

    #[test]
    fn insufficient_history() {
        let series = make_series(&[100.0, 101.0]);
        assert!(fibonacci_levels(&series, 1, 50).is_err());
    }
}
