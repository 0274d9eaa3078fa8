//! Relative Strength Index over simple rolling gain/loss means.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss) over the last `period` close
//! deltas. Degenerate windows resolve deterministically: all-gain is 100,
//! all-loss is 0, perfectly flat is neutral 50.

use super::{window, EPSILON};
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// RSI at `index` over `period` deltas (needs `period + 1` bars).
pub fn rsi(series: &PriceSeries, index: usize, period: usize) -> Result<f64, IndicatorError> {
    assert!(period >= 1, "RSI period must be >= 1");
    let bars = window(series, index, period + 1)?;

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in bars.windows(2) {
        let delta = pair[1].close - pair[0].close;
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }
    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss < EPSILON {
        if avg_gain < EPSILON {
            return Ok(50.0);
        }
        return Ok(100.0);
    }
    if avg_gain < EPSILON {
        return Ok(0.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - 100.0 / (1.0 + rs))
}
