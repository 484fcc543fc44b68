use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Serialize;
use tickerboard_market_data::{
    aggregate_markets, assemble_stock, check_search_status, resolve_markets, ErrorClass,
    FallbackMarkets, MarketDataError, MarketsSource, RawMarketsDocument, RawStockDocument, Region,
    TimeRange,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, MarketsArgs, StockArgs};
use crate::config::Config;

/// Logs go to stderr so stdout carries only the JSON payload.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Reads the whole input document. `None` or `-` means stdin.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

/// Query parameters the markets engine is called with for `region`.
pub fn markets_request_params(region: Region) -> [(&'static str, &'static str); 3] {
    [
        ("engine", "google_finance_markets"),
        ("gl", region.country_code()),
        ("trend", region.trend()),
    ]
}

pub fn run_markets(args: &MarketsArgs, config: &Config, document: &str) -> anyhow::Result<String> {
    let region = match args.region.as_deref() {
        Some(r) => Region::parse(r).ok_or_else(|| anyhow!("Unknown region '{}'", r))?,
        None => config.default_region,
    };
    tracing::debug!("Markets request parameters: {:?}", markets_request_params(region));
    let raw: RawMarketsDocument = document.parse()?;

    let data = if config.use_fallback && !args.no_fallback {
        let outcome = resolve_markets(&raw, region, &FallbackMarkets::standard());
        if outcome.source == MarketsSource::Fallback {
            tracing::warn!(
                "Serving fallback markets for region {} ({} upstream items)",
                region,
                outcome.aggregated_total
            );
        }
        outcome.data
    } else {
        if let Some(error) = raw.error.as_deref() {
            tracing::warn!("Upstream reported an error: {}", error);
        }
        aggregate_markets(&raw)
    };

    tracing::info!("Markets ready: {} items", data.total_len());
    render(&data, config.pretty)
}

pub fn run_stock(args: &StockArgs, config: &Config, document: &str) -> anyhow::Result<String> {
    let range = args
        .range
        .as_deref()
        .map(TimeRange::parse)
        .unwrap_or_else(|| config.default_range.clone());
    let raw: RawStockDocument = document.parse()?;

    check_search_status(&raw)?;
    let data = assemble_stock(&raw, &args.symbol, &range)?;

    tracing::info!(
        "Stock {} ready: {} graph points over {}, fresh for {}s",
        args.symbol,
        data.graph.graph.len(),
        range,
        range.stale_after().as_secs()
    );
    render(&data, config.pretty)
}

pub fn run(cli: Cli, config: &Config) -> anyhow::Result<String> {
    match &cli.command {
        Commands::Markets(args) => {
            let document = read_input(args.input.as_deref())?;
            run_markets(args, config, &document)
        }
        Commands::Stock(args) => {
            let document = read_input(args.input.as_deref())?;
            run_stock(args, config, &document)
        }
    }
}

/// Maps a failure to a process exit status by its error class.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<MarketDataError>().map(|e| e.class()) {
        Some(ErrorClass::BadInput) => 2,
        Some(ErrorClass::NotFound) => 3,
        Some(ErrorClass::Upstream) => 4,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn quiet_config() -> Config {
        Config {
            pretty: false,
            ..Config::default()
        }
    }

    fn markets_args(region: Option<&str>, no_fallback: bool) -> MarketsArgs {
        MarketsArgs {
            input: None,
            region: region.map(str::to_string),
            no_fallback,
        }
    }

    fn stock_args(symbol: &str, range: Option<&str>) -> StockArgs {
        StockArgs {
            input: None,
            symbol: symbol.to_string(),
            range: range.map(str::to_string),
        }
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"markets": {{}}}}"#).unwrap();

        let contents = read_input(Some(file.path())).unwrap();
        assert_eq!(contents, r#"{"markets": {}}"#);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/tickerboard.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_markets_request_params() {
        assert_eq!(
            markets_request_params(Region::Europe),
            [
                ("engine", "google_finance_markets"),
                ("gl", "gb"),
                ("trend", "indexes")
            ]
        );
        assert_eq!(markets_request_params(Region::Crypto)[1], ("gl", "us"));
        assert_eq!(markets_request_params(Region::Futures)[2], ("trend", "most-active"));
    }

    #[test]
    fn test_run_markets_aggregates() {
        let doc =
            r#"{"markets": {"us": [{"stock": "A", "price": 1}, {"stock": "A", "price": 2}]}}"#;
        let out = run_markets(&markets_args(None, false), &quiet_config(), doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["us"].as_array().unwrap().len(), 1);
        assert_eq!(value["us"][0]["price"], 1.0);
        assert!(value["europe"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_run_markets_empty_uses_fallback() {
        let out = run_markets(&markets_args(Some("asia"), false), &quiet_config(), "{}").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(!value["us"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_run_markets_no_fallback_keeps_empty() {
        let out = run_markets(&markets_args(None, true), &quiet_config(), "{}").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["us"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_run_markets_rejects_unknown_region() {
        let err =
            run_markets(&markets_args(Some("mars"), false), &quiet_config(), "{}").unwrap_err();
        assert!(err.to_string().contains("Unknown region"));
    }

    #[test]
    fn test_run_stock_synthesizes_graph() {
        let doc = r#"{"summary": {"price": {"current": 50, "previous_close": 45}}}"#;
        let out = run_stock(&stock_args("ABC:NYSE", Some("1M")), &quiet_config(), doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["stock"], "ABC");
        assert_eq!(value["exchange"], "NYSE");
        assert_eq!(value["graph"]["timespan"], "1M");
        assert_eq!(value["graph"]["graph"].as_array().unwrap().len(), 30);
    }

    #[test]
    fn test_run_stock_missing_summary_is_not_found() {
        let err = run_stock(&stock_args("ABC", None), &quiet_config(), "{}").unwrap_err();
        assert_eq!(exit_status(&err), 3);
    }

    #[test]
    fn test_run_stock_failed_search_is_upstream() {
        let doc = r#"{"search_metadata": {"status": "Error"}, "summary": {}}"#;
        let err = run_stock(&stock_args("ABC", None), &quiet_config(), doc).unwrap_err();
        assert_eq!(exit_status(&err), 4);
        assert!(err.to_string().contains("Error"));
    }

    #[test]
    fn test_run_stock_invalid_json_is_bad_input() {
        let err = run_stock(&stock_args("ABC", None), &quiet_config(), "not json").unwrap_err();
        assert_eq!(exit_status(&err), 2);
    }
}
