//! ProTrader CLI — signal and backtest commands.
//!
//! Commands:
//! - `bots` — list registered bots as JSON
//! - `signals` — aggregate signals at the last bar of a series
//! - `backtest` — run one bot through the simulator
//! - `sweep` — every bot over the data in parallel, with the ledger

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use protrader_core::aggregator;
use protrader_core::features::FeatureSet;
use protrader_core::sim::{run, SimConfig};
use protrader_core::strategies::registry;
use protrader_runner::{load_csv, run_batch, synthetic_series, BacktestRecord, SignalRecord};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "protrader",
    about = "ProTrader CLI — multi-bot signal and backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the price series comes from: a CSV file or the seeded generator.
#[derive(Args)]
struct DataSource {
    /// CSV file with timestamp,open,high,low,close,volume rows.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Seed for the synthetic generator (used when no CSV is given).
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of synthetic bars.
    #[arg(long, default_value_t = 200)]
    bars: usize,
}

impl DataSource {
    fn load(&self, symbol: &str) -> Result<protrader_core::domain::PriceSeries> {
        match &self.csv {
            Some(path) => load_csv(path, symbol)
                .with_context(|| format!("loading {}", path.display())),
            None => {
                if self.bars == 0 {
                    bail!("--bars must be at least 1");
                }
                Ok(synthetic_series(symbol, self.bars, self.seed))
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List registered bots (id, name, minimum lookback) as JSON.
    Bots,
    /// Aggregate signals from all bots at the last bar.
    Signals {
        /// Symbol label for the series.
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        #[command(flatten)]
        data: DataSource,

        /// Sentiment feature value for the AI-driven bots.
        #[arg(long)]
        sentiment: Option<f64>,

        /// Options-flow feature value for the AI-driven bots.
        #[arg(long)]
        options_flow: Option<f64>,
    },
    /// Run one bot's backtest and print the result record.
    Backtest {
        /// Bot id (see `bots`).
        #[arg(long)]
        bot: String,

        /// Symbol label for the series.
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        #[command(flatten)]
        data: DataSource,

        /// Starting equity.
        #[arg(long, default_value_t = 10_000.0)]
        equity: f64,

        /// Fraction of equity risked per trade.
        #[arg(long, default_value_t = 0.02)]
        risk: f64,
    },
    /// Run every bot over the data in parallel and print the ledger.
    Sweep {
        /// Symbol label for the series.
        #[arg(long, default_value = "AAPL")]
        symbol: String,

        #[command(flatten)]
        data: DataSource,

        /// Starting equity.
        #[arg(long, default_value_t = 10_000.0)]
        equity: f64,

        /// Fraction of equity risked per trade.
        #[arg(long, default_value_t = 0.02)]
        risk: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bots => cmd_bots(),
        Commands::Signals {
            symbol,
            data,
            sentiment,
            options_flow,
        } => cmd_signals(&symbol, &data, sentiment, options_flow),
        Commands::Backtest {
            bot,
            symbol,
            data,
            equity,
            risk,
        } => cmd_backtest(&bot, &symbol, &data, equity, risk),
        Commands::Sweep {
            symbol,
            data,
            equity,
            risk,
        } => cmd_sweep(&symbol, &data, equity, risk),
    }
}

fn cmd_bots() -> Result<()> {
    let bots: Vec<serde_json::Value> = registry()
        .iter()
        .map(|bot| {
            serde_json::json!({
                "id": bot.id(),
                "name": bot.name(),
                "min_lookback": bot.min_lookback(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&bots)?);
    Ok(())
}

fn backtest_features(sentiment: Option<f64>, options_flow: Option<f64>) -> FeatureSet {
    let mut features = FeatureSet::backtest();
    if let Some(value) = sentiment {
        features.insert("sentiment", value);
    }
    if let Some(value) = options_flow {
        features.insert("options_flow", value);
    }
    features
}

fn cmd_signals(
    symbol: &str,
    data: &DataSource,
    sentiment: Option<f64>,
    options_flow: Option<f64>,
) -> Result<()> {
    let series = data.load(symbol)?;
    if series.is_empty() {
        bail!("series for {symbol} is empty");
    }
    // Without explicit feature values, rank only the price-driven bots.
    let all = registry();
    let bots: Vec<_> = all
        .into_iter()
        .filter(|bot| match bot.id() {
            "news_sentiment_trader" => sentiment.is_some(),
            "options_flow_tracker" => options_flow.is_some(),
            _ => true,
        })
        .collect();
    let features = backtest_features(sentiment, options_flow);

    let signals = aggregator::generate(&series, series.len() - 1, &bots, &features)?;
    let records: Vec<SignalRecord> = signals
        .iter()
        .map(|signal| {
            let name = bots
                .iter()
                .find(|b| b.id() == signal.strategy_id)
                .map(|b| b.name())
                .unwrap_or(signal.strategy_id.as_str());
            SignalRecord::from_signal(signal, name)
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "symbol": symbol,
            "signals": records,
        }))?
    );
    Ok(())
}

fn cmd_backtest(bot_id: &str, symbol: &str, data: &DataSource, equity: f64, risk: f64) -> Result<()> {
    let bots = registry();
    let bot = bots
        .iter()
        .find(|b| b.id() == bot_id)
        .with_context(|| format!("unknown bot `{bot_id}` (see `protrader bots`)"))?;
    let series = data.load(symbol)?;
    let config = SimConfig {
        initial_equity: equity,
        risk_per_trade: risk,
    };

    let result = run(&series, bot.as_ref(), &FeatureSet::backtest(), &config)
        .with_context(|| format!("backtest of {bot_id} on {symbol}"))?;
    let record = BacktestRecord::from_result(&result, bot.name());
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn cmd_sweep(symbol: &str, data: &DataSource, equity: f64, risk: f64) -> Result<()> {
    let series = vec![data.load(symbol)?];
    let config = SimConfig {
        initial_equity: equity,
        risk_per_trade: risk,
    };
    // Feature-gated bots are excluded: a sweep runs in backtest mode with
    // no historical feature values.
    let bots: Vec<_> = registry()
        .into_iter()
        .filter(|bot| {
            !matches!(bot.id(), "news_sentiment_trader" | "options_flow_tracker")
        })
        .collect();

    let report = run_batch(&bots, &series, &FeatureSet::backtest(), &config);

    for outcome in &report.runs {
        match &outcome.outcome {
            Ok(result) => {
                let id = outcome
                    .run_id
                    .as_ref()
                    .map(|r| r.short().to_string())
                    .unwrap_or_default();
                println!(
                    "{:<28} {:>3} trades  win {:>6.2}%  return {:>7.2}%  dd {:>7.2}%  [{}]",
                    outcome.strategy_id,
                    result.summary.total_trades,
                    result.summary.win_rate,
                    result.summary.total_return_pct,
                    result.summary.max_drawdown_pct,
                    id,
                );
            }
            Err(err) => {
                eprintln!("{:<28} failed: {err}", outcome.strategy_id);
            }
        }
    }

    println!();
    println!("ledger:");
    for (id, perf) in report.ledger.iter() {
        println!(
            "{:<28} signals {:>4}  winners {:>4}  pnl {:>10.2}",
            id, perf.total_signals, perf.winning_signals, perf.total_pnl
        );
    }

    if report.failures().next().is_some() {
        std::process::exit(1);
    }
    Ok(())
}
