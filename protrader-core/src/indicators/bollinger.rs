//! Bollinger Bands — SMA ± k standard deviations (sample std).

use super::window;
use crate::domain::PriceSeries;
use crate::error::IndicatorError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bands at `index` over `period` closes with `k` standard deviations.
pub fn bollinger(
    series: &PriceSeries,
    index: usize,
    period: usize,
    k: f64,
) -> Result<BollingerBands, IndicatorError> {
    assert!(period >= 2, "Bollinger period must be >= 2");
    assert!(k > 0.0, "Bollinger k must be > 0");
    let bars = window(series, index, period)?;

    let mean = bars.iter().map(|b| b.close).sum::<f64>() / period as f64;
    let variance = bars
        .iter()
        .map(|b| (b.close - mean).powi(2))
        .sum::<f64>()
        / (period - 1) as f64;
    let std = variance.sqrt();

    Ok(BollingerBands {
        upper: mean + k * std,
        middle: mean,
        lower: mean - k * std,
    })
}
