//! MACD — Moving Average Convergence/Divergence.
//!
//! MACD line = EMA(fast) - EMA(slow); signal line = EMA(signal_period) of
//! the MACD line; histogram = MACD - signal. Valid once `slow + signal - 1`
//! bars exist, so the signal line has a full seed window.

use super::ema::ema_last;
use super::bar_at;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD at `index` with the given fast/slow/signal periods.
pub fn macd(
    series: &PriceSeries,
    index: usize,
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<Macd, IndicatorError> {
    assert!(
        fast >= 1 && slow > fast && signal >= 1,
        "MACD periods must satisfy 1 <= fast < slow, signal >= 1"
    );
    bar_at(series, index)?;
    let required = slow + signal - 1;
    if index + 1 < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available: index + 1,
        });
    }

    let closes: Vec<f64> = series.bars()[..=index].iter().map(|b| b.close).collect();

    // MACD line for every bar where both EMAs exist: indices slow-1 ..= index.
    let macd_line: Vec<f64> = (slow - 1..closes.len())
        .map(|i| {
            let f = ema_last(&closes[..=i], fast);
            let s = ema_last(&closes[..=i], slow);
            match (f, s) {
                (Some(f), Some(s)) => f - s,
                // Unreachable: i + 1 >= slow > fast by construction.
                _ => f64::NAN,
            }
        })
        .collect();

    let macd_value = *macd_line.last().ok_or(IndicatorError::InsufficientData {
        required,
        available: index + 1,
    })?;
    let signal_value = ema_last(&macd_line, signal).ok_or(IndicatorError::InsufficientData {
        required,
        available: index + 1,
    })?;

    Ok(Macd {
        macd: macd_value,
        signal: signal_value,
        histogram: macd_value - signal_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_series};

    #[test]
    fn macd_zero_on_constant_series() {
        let series = make_series(&[100.0; 40]);
        let m = macd(&series, 39, 12, 26, 9).unwrap();
        assert_approx(m.macd, 0.0, 1e-10);
        assert_approx(m.signal, 0.0, 1e-10);
        assert_approx(m.histogram, 0.0, 1e-10);
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = make_series(&closes);
        let m = macd(&series, 59, 12, 26, 9).unwrap();
        // Fast EMA tracks a rising series more closely than slow EMA.
        assert!(m.macd > 0.0, "macd should be positive, got {}", m.macd);
    }

    #[test]
    fn macd_insufficient_history() {
        let series = make_series(&[100.0; 20]);
        let err = macd(&series, 19, 12, 26, 9).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InsufficientData {
                required: 34,
                available: 20
            }
        );
    }

    #[test]
    fn macd_exact_at_required_length() {
        // 26 + 9 - 1 = 34 bars is the minimum.
        let series = make_series(&vec![100.0; 34]);
        assert!(macd(&series, 33, 12, 26, 9).is_ok());
        assert!(macd(&series, 32, 12, 26, 9).is_err());
    }

    #[test]
    #[should_panic(expected = "MACD periods")]
    fn macd_rejects_fast_not_below_slow() {
        let series = make_series(&[100.0; 40]);
        let _ = macd(&series, 39, 26, 12, 9);
    }
}
