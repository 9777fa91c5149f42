//! CLI entry point for the cyclic arbitrage detector.
//!
//! Parses candidate currencies (inline or from a file), drives
//! `detector::analyze` against the bundled in-memory demo exchange, and
//! prints the resulting report.

mod mock_client;

use std::fs;
use std::path::PathBuf;

use arb_common::Currency;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;

use mock_client::MockExchangeClient;

/// Detect cyclic arbitrage across a set of currencies from an order-book snapshot.
#[derive(Parser, Debug)]
#[command(name = "arbitrage-cli", version, about)]
struct Args {
    /// Candidate currency codes to analyze, e.g. BTC ETH USDT.
    currencies: Vec<String>,

    /// Read the candidate currency list from a newline-delimited file
    /// instead of (or in addition to) the positional arguments.
    #[arg(long)]
    currencies_file: Option<PathBuf>,

    /// 30-day USD trading volume used to resolve the fee tier.
    #[arg(long, default_value = "1000000000000")]
    traded_volume_usd: Decimal,

    /// Quiet the progress log lines and print only the final report.
    #[arg(long)]
    quiet: bool,
}

fn init_tracing(quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_currencies(args: &Args) -> anyhow::Result<Vec<Currency>> {
    let mut symbols: Vec<String> = args.currencies.clone();

    if let Some(path) = &args.currencies_file {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read currencies file {}: {e}", path.display()))?;
        symbols.extend(contents.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string));
    }

    if symbols.is_empty() {
        anyhow::bail!("no currencies given — pass them as arguments or via --currencies-file");
    }

    Ok(symbols.iter().map(|s| Currency::from(s.as_str())).collect())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet);

    let currencies = load_currencies(&args)?;
    info!(?currencies, traded_volume_usd = %args.traded_volume_usd, "starting arbitrage analysis");

    let client = MockExchangeClient::demo();
    let report = detector::analyze(&client, &currencies, args.traded_volume_usd).await?;

    println!("{report}");

    Ok(())
}
