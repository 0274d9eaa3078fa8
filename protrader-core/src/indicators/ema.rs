//! Exponential Moving Average.
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], with
//! alpha = 2 / (period + 1). Seeded with the SMA of the first `period`
//! closes, so the value at `index` depends only on bars [0, index].

use super::bar_at;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// EMA of closing prices at `index`.
pub fn ema(series: &PriceSeries, index: usize, period: usize) -> Result<f64, IndicatorError> {
    assert!(period >= 1, "EMA period must be >= 1");
    bar_at(series, index)?;
    let closes: Vec<f64> = series.bars()[..=index].iter().map(|b| b.close).collect();
    ema_last(&closes, period).ok_or(IndicatorError::InsufficientData {
        required: period,
        available: index + 1,
    })
}

/// Final EMA value of an arbitrary series, or `None` when it is shorter than
/// `period`. Used by composed indicators (MACD signal line).
pub(crate) fn ema_last(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let mut prev = seed;
    for &v in &values[period..] {
        prev = alpha * v + (1.0 - alpha) * prev;
    }
    Some(prev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_close() {
        let series = make_series(&[100.0, 200.0, 300.0]);
        assert_approx(ema(&series, 2, 1).unwrap(), 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_3_known_values() {
        // Closes: 10, 11, 12, 13, 14; alpha = 0.5
        // Seed at index 2: SMA(10,11,12) = 11.0
        // EMA[3] = 0.5*13 + 0.5*11.0 = 12.0
        // EMA[4] = 0.5*14 + 0.5*12.0 = 13.0
        let series = make_series(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_approx(ema(&series, 2, 3).unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(ema(&series, 3, 3).unwrap(), 12.0, DEFAULT_EPSILON);
        assert_approx(ema(&series, 4, 3).unwrap(), 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_insufficient_history() {
        let series = make_series(&[10.0, 11.0]);
        let err = ema(&series, 1, 3).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 3,
                available: 2
            }
        );
    }

    #[test]
    fn ema_last_short_series_is_none() {
        assert_eq!(ema_last(&[1.0, 2.0], 3), None);
        assert_eq!(ema_last(&[], 1), None);
    }
}
