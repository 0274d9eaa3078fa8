//! Signal aggregation across strategy bots.
//!
//! Every registered bot is evaluated at the same bar; the surviving signals
//! are ordered by descending confidence with registration order breaking
//! ties. Conflicting opinions are deliberately both reported, ranking is the
//! aggregator's only job.

use crate::domain::{PriceSeries, Signal};
use crate::error::EvalError;
use crate::features::FeatureSet;
use crate::strategies::Strategy;

/// Evaluate `strategies` at `index` and rank the signals that fire.
///
/// The sort is deterministic: confidence descending, then the position of
/// the emitting bot in `strategies`. A bot error (e.g. a missing feature)
/// aborts the whole aggregation, partial rankings are worse than none.
pub fn generate(
    series: &PriceSeries,
    index: usize,
    strategies: &[Box<dyn Strategy>],
    features: &FeatureSet,
) -> Result<Vec<Signal>, EvalError> {
    let mut ranked: Vec<(usize, Signal)> = Vec::new();
    for (order, bot) in strategies.iter().enumerate() {
        if let Some(signal) = bot.evaluate(series, index, features)? {
            ranked.push((order, signal));
        }
    }
    ranked.sort_by(|(a_order, a), (b_order, b)| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a_order.cmp(b_order))
    });
    Ok(ranked.into_iter().map(|(_, signal)| signal).collect())
}
