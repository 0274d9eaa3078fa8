//! Parallel batch execution over (bot × symbol) combinations.
//!
//! Each combination is one independent simulator run, fanned out with
//! rayon. A failing run aborts only itself; its error is carried in the
//! report next to the successful results. The ledger merge happens after
//! the parallel phase, on one thread.

use protrader_core::domain::{BacktestResult, PriceSeries};
use protrader_core::error::BacktestError;
use protrader_core::features::FeatureSet;
use protrader_core::sim::{run, SimConfig};
use protrader_core::strategies::Strategy;
use rayon::prelude::*;

use crate::fingerprint::{run_id, RunId};
use crate::ledger::PerformanceLedger;

/// One (bot, symbol) run: the fingerprint plus its result or error.
#[derive(Debug)]
pub struct RunOutcome {
    pub run_id: Option<RunId>,
    pub strategy_id: String,
    pub symbol: String,
    pub outcome: Result<BacktestResult, BacktestError>,
}

/// Everything a batch produced: per-run outcomes and the merged ledger.
#[derive(Debug)]
pub struct BatchReport {
    pub runs: Vec<RunOutcome>,
    pub ledger: PerformanceLedger,
}

impl BatchReport {
    pub fn successes(&self) -> impl Iterator<Item = &BacktestResult> {
        self.runs.iter().filter_map(|r| r.outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &BacktestError)> {
        self.runs
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.strategy_id.as_str(), e)))
    }
}

/// Run every strategy against every series in parallel.
///
/// Output order is deterministic: series-major, then registration order,
/// independent of worker scheduling.
pub fn run_batch(
    strategies: &[Box<dyn Strategy>],
    series_set: &[PriceSeries],
    features: &FeatureSet,
    config: &SimConfig,
) -> BatchReport {
    let pairs: Vec<(usize, usize)> = (0..series_set.len())
        .flat_map(|s| (0..strategies.len()).map(move |b| (s, b)))
        .collect();

    let runs: Vec<RunOutcome> = pairs
        .par_iter()
        .map(|&(s, b)| {
            let series = &series_set[s];
            let strategy = strategies[b].as_ref();
            let outcome = run(series, strategy, features, config);
            let run_id = outcome
                .as_ref()
                .ok()
                .map(|result| run_id(strategy.id(), series.symbol(), config, &result.period));
            RunOutcome {
                run_id,
                strategy_id: strategy.id().to_string(),
                symbol: series.symbol().to_string(),
                outcome,
            }
        })
        .collect();

    let mut ledger = PerformanceLedger::new();
    for result in runs.iter().filter_map(|r| r.outcome.as_ref().ok()) {
        ledger.record(result);
    }

    BatchReport { runs, ledger }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic_series;
    use protrader_core::strategies::registry;

    #[test]
    fn batch_covers_every_combination_in_order() {
        let strategies = registry();
        let series = vec![
            synthetic_series("AAPL", 120, 1),
            synthetic_series("TSLA", 120, 2),
        ];
        let features = FeatureSet::live()
            .with("sentiment", 0.7)
            .with("options_flow", 0.6);
        let report = run_batch(&strategies, &series, &features, &SimConfig::default());

        assert_eq!(report.runs.len(), 30);
        assert_eq!(report.runs[0].symbol, "AAPL");
        assert_eq!(report.runs[0].strategy_id, "wick_master_pro");
        assert_eq!(report.runs[15].symbol, "TSLA");
        assert!(report.runs.iter().all(|r| r.outcome.is_ok()));
        assert!(report.runs.iter().all(|r| r.run_id.is_some()));
    }

    #[test]
    fn feature_starved_bots_fail_alone() {
        // Without AI features the two feature-gated bots error; the other
        // thirteen runs still succeed and feed the ledger.
        let strategies = registry();
        let series = vec![synthetic_series("NVDA", 120, 3)];
        let report = run_batch(
            &strategies,
            &series,
            &FeatureSet::backtest(),
            &SimConfig::default(),
        );

        let failed: Vec<&str> = report.failures().map(|(id, _)| id).collect();
        assert_eq!(failed.len(), 2);
        assert!(failed.contains(&"news_sentiment_trader"));
        assert!(failed.contains(&"options_flow_tracker"));
        assert_eq!(report.successes().count(), 13);
        assert!(report.ledger.get("news_sentiment_trader").is_none());
    }

    #[test]
    fn ledger_matches_run_results() {
        let strategies = registry();
        let series = vec![synthetic_series("AAPL", 200, 11)];
        let features = FeatureSet::live()
            .with("sentiment", 0.7)
            .with("options_flow", 0.6);
        let report = run_batch(&strategies, &series, &features, &SimConfig::default());

        for result in report.successes() {
            let perf = report
                .ledger
                .get(&result.strategy_id)
                .expect("every success is recorded");
            assert_eq!(perf.total_signals, result.trades.len());
        }
    }
}
