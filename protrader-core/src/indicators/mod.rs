//! Pure indicator functions.
//!
//! Every indicator takes a `PriceSeries`, a current bar index, and (where
//! relevant) a lookback length, and returns a value or
//! `IndicatorError::InsufficientData`. No shared mutable state, no
//! randomness, no wall-clock — identical inputs always produce identical
//! outputs, so indicators can be called concurrently for different
//! symbols/bars without synchronization.

pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod gap;
pub mod macd;
pub mod momentum;
pub mod patterns;
pub mod range;
pub mod rsi;
pub mod sma;
pub mod volume;
pub mod wick;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use fibonacci::{fibonacci_levels, FibLevels, KEY_RATIOS};
pub use gap::gap_pct;
pub use macd::{macd, Macd};
pub use momentum::roc;
pub use patterns::{bearish_engulfing, bullish_engulfing, hammer_score, shooting_star_score};
pub use range::{nearest_level, rolling_high, rolling_low, support_resistance_levels};
pub use rsi::rsi;
pub use sma::sma;
pub use volume::volume_ratio;
pub use wick::{lower_wick_ratio, range_position, upper_wick_ratio};

use crate::domain::{PriceBar, PriceSeries};
use crate::error::IndicatorError;

/// Division guard for zero-body bars and zero-volume windows.
pub(crate) const EPSILON: f64 = 1e-9;

/// Trailing window of `required` bars ending at (and including) `index`.
pub(crate) fn window(
    series: &PriceSeries,
    index: usize,
    required: usize,
) -> Result<&[PriceBar], IndicatorError> {
    let bars = series.bars();
    if index >= bars.len() || index + 1 < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available: bars.len().min(index + 1),
        });
    }
    Ok(&bars[index + 1 - required..=index])
}

/// The bar at `index`, or `InsufficientData` when the index is past the end.
pub(crate) fn bar_at(series: &PriceSeries, index: usize) -> Result<&PriceBar, IndicatorError> {
    series
        .bar(index)
        .ok_or(IndicatorError::InsufficientData {
            required: index + 1,
            available: series.len(),
        })
}

/// Create a series from close prices for testing.
///
/// Generates plausible OHLCV: open = prev close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> PriceSeries {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1_000.0,
            }
        })
        .collect();
    PriceSeries::new("TEST", bars).expect("synthetic test bars are valid")
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_returns_trailing_slice() {
        let series = make_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let w = window(&series, 4, 3).unwrap();
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].close, 3.0);
        assert_eq!(w[2].close, 5.0);
    }

    #[test]
    fn window_insufficient_data() {
        let series = make_series(&[1.0, 2.0, 3.0]);
        let err = window(&series, 1, 3).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 3,
                available: 2
            }
        );
    }

    #[test]
    fn window_index_out_of_bounds() {
        let series = make_series(&[1.0, 2.0]);
        assert!(window(&series, 5, 1).is_err());
    }
}
