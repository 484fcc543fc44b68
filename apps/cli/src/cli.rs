use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tickerboard",
    version,
    about = "Normalize Google Finance documents for the dashboard",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate a raw markets document into the six region buckets.
    Markets(MarketsArgs),

    /// Normalize a raw stock document into a stock record with a graph.
    Stock(StockArgs),
}

#[derive(Args, Debug)]
pub struct MarketsArgs {
    /// Raw JSON document; `-` or absent reads stdin.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Region the dashboard asked for (selects the fallback slice).
    #[arg(short, long)]
    pub region: Option<String>,

    /// Print the aggregate even when it is empty or the upstream reported an error.
    #[arg(long)]
    pub no_fallback: bool,
}

#[derive(Args, Debug)]
pub struct StockArgs {
    /// Raw JSON document; `-` or absent reads stdin.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Requested symbol, e.g. `AAPL:NASDAQ`.
    #[arg(short, long)]
    pub symbol: String,

    /// Chart range token (1D, 5D, 1M, 3M, 6M, YTD, 1Y, 5Y, MAX).
    #[arg(short, long)]
    pub range: Option<String>,
}
