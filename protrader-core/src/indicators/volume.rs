//! Volume ratio — current volume against the trailing average.

use super::{window, EPSILON};
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

/// Current bar volume divided by the mean volume of the `lookback` bars
/// before it (the current bar is excluded from the mean). A zero-volume
/// window reads as a neutral 1.0.
pub fn volume_ratio(
    series: &PriceSeries,
    index: usize,
    lookback: usize,
) -> Result<f64, IndicatorError> {
    assert!(lookback >= 1, "volume lookback must be >= 1");
    let bars = window(series, index, lookback + 1)?;
    let (trailing, current) = bars.split_at(lookback);
    let mean = trailing.iter().map(|b| b.volume).sum::<f64>() / lookback as f64;
    if mean < EPSILON {
        return Ok(1.0);
    }
    Ok(current[0].volume / mean)
}
