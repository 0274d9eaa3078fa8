//! Rate of change — fractional price change over n bars.

use super::window;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// (close[index] - close[index - n]) / close[index - n].
pub fn roc(series: &PriceSeries, index: usize, n: usize) -> Result<f64, IndicatorError> {
    assert!(n >= 1, "ROC span must be >= 1");
    let bars = window(series, index, n + 1)?;
    let past = bars[0].close;
    let current = bars[n].close;
    Ok((current - past) / past)
}
