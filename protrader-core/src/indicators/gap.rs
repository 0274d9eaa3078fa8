//! Opening gap against the previous close.

use super::window;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// (open[index] - close[index - 1]) / close[index - 1].
pub fn gap_pct(series: &PriceSeries, index: usize) -> Result<f64, IndicatorError> {
    let bars = window(series, index, 2)?;
    let prev_close = bars[0].close;
    Ok((bars[1].open - prev_close) / prev_close)
}
