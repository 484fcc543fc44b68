use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::errors::MarketDataError;
use crate::extract::extract_summary;
use crate::models::de::number_from_value;
use crate::models::{GraphPoint, RawStockDocument, StockData, StockGraph, TimeRange};
use crate::series::{format_label, synthesize_series, Jitter, RandomJitter};

const SUCCESS_STATUS: &str = "Success";
const UNKNOWN_EXCHANGE: &str = "UNKNOWN";

/// Fails when the upstream marks the search as anything but `"Success"`.
///
/// Documents without `search_metadata` pass.
pub fn check_search_status(raw: &RawStockDocument) -> Result<(), MarketDataError> {
    match raw.search_status() {
        Some(status) if status != SUCCESS_STATUS => Err(MarketDataError::UpstreamStatus {
            status: status.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Reads the upstream series, keeping points with a timestamp and a positive price.
///
/// Returns `None` when the graph is absent, not an array, or has no usable point.
fn real_series(graph: Option<&Value>, range: &TimeRange) -> Option<Vec<GraphPoint>> {
    let points = graph?.get("graph")?.as_array()?;

    let series: Vec<GraphPoint> = points
        .iter()
        .filter_map(|point| {
            let timestamp = point.get("timestamp").and_then(|t| {
                t.as_i64()
                    .or_else(|| t.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
            })?;
            let price = point
                .get("price")
                .and_then(number_from_value)
                .filter(|p| *p > 0.0)?;
            Some(GraphPoint {
                timestamp,
                price,
                date: format_label(timestamp, range),
            })
        })
        .collect();

    if series.len() < points.len() {
        warn!(
            "Dropped {} unusable graph points",
            points.len() - series.len()
        );
    }

    (!series.is_empty()).then_some(series)
}

fn identity(raw: &RawStockDocument, symbol: &str) -> (String, String, String) {
    let symbol = symbol.trim();
    let (ticker, exchange) = match symbol.split_once(':') {
        Some((ticker, exchange)) => (ticker, Some(exchange).filter(|e| !e.is_empty())),
        None => (symbol, None),
    };

    let title = raw
        .title
        .clone()
        .unwrap_or_else(|| format!("{} Stock", symbol));
    let stock = raw.stock.clone().unwrap_or_else(|| ticker.to_string());
    let exchange = raw
        .exchange
        .clone()
        .or_else(|| exchange.map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_EXCHANGE.to_string());
    (title, stock, exchange)
}

/// Assembles a normalized stock record with injected time and noise.
///
/// `symbol` is the symbol the caller asked for (`"AAPL:NASDAQ"`); it only
/// fills identity fields the document leaves out.
pub fn assemble_stock_with<J: Jitter + ?Sized>(
    raw: &RawStockDocument,
    symbol: &str,
    range: &TimeRange,
    now: DateTime<Utc>,
    jitter: &mut J,
) -> Result<StockData, MarketDataError> {
    let summary_doc = raw.summary().ok_or(MarketDataError::MissingSummary)?;
    let summary = extract_summary(summary_doc);

    let upstream_previous_close = raw
        .graph
        .as_ref()
        .and_then(|g| g.get("previous_close"))
        .and_then(number_from_value)
        .filter(|p| *p > 0.0);
    let previous_close = upstream_previous_close.unwrap_or(summary.price.previous_close);

    let points = match real_series(raw.graph.as_ref(), range) {
        Some(points) => {
            debug!("Using {} upstream graph points", points.len());
            points
        }
        None => {
            warn!("No graph data for {}, synthesizing {} series", symbol, range);
            synthesize_series(
                summary.price.current,
                summary.price.previous_close,
                range,
                now,
                jitter,
            )
        }
    };

    let (title, stock, exchange) = identity(raw, symbol);

    Ok(StockData {
        title,
        stock,
        exchange,
        summary,
        graph: StockGraph {
            timespan: range.as_str().to_string(),
            previous_close,
            graph: points,
        },
    })
}

/// Assembles a normalized stock record using the wall clock and thread-local randomness.
pub fn assemble_stock(
    raw: &RawStockDocument,
    symbol: &str,
    range: &TimeRange,
) -> Result<StockData, MarketDataError> {
    assemble_stock_with(
        raw,
        symbol,
        range,
        Utc::now(),
        &mut RandomJitter(rand::thread_rng()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::FixedJitter;
    use chrono::TimeZone;
    use serde_json::json;

    fn doc(value: Value) -> RawStockDocument {
        RawStockDocument::from_value(value).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 20, 0, 0).unwrap()
    }

    fn assemble(
        raw: &RawStockDocument,
        symbol: &str,
        range: &str,
    ) -> Result<StockData, MarketDataError> {
        assemble_stock_with(raw, symbol, &TimeRange::parse(range), now(), &mut FixedJitter(0.0))
    }

    #[test]
    fn test_missing_summary_fails() {
        let raw = doc(json!({"graph": {"graph": [{"timestamp": 1, "price": 2.0}]}}));
        let result = assemble(&raw, "AAPL:NASDAQ", "1D");
        assert!(matches!(result, Err(MarketDataError::MissingSummary)));
    }

    #[test]
    fn test_synthesizes_when_graph_missing() {
        let raw = doc(json!({"summary": {"price": {"current": 50, "previous_close": 45}}}));
        let data = assemble(&raw, "XYZ:NYSE", "1M").unwrap();

        assert_eq!(data.graph.timespan, "1M");
        assert_eq!(data.graph.graph.len(), 30);
        assert_eq!(data.graph.graph.last().unwrap().price, 50.0);
        assert_eq!(data.graph.previous_close, 45.0);
        assert_eq!(data.summary.price.change, 5.0);
    }

    #[test]
    fn test_flat_price_drives_summary_and_graph() {
        let raw = doc(json!({"summary": {"price": 50.0, "previous_close": 45.0}}));
        let data = assemble(&raw, "XYZ:NYSE", "1M").unwrap();

        assert_eq!(data.summary.price.current, 50.0);
        assert_eq!(data.summary.price.change, 5.0);
        assert_eq!(data.graph.graph.last().unwrap().price, 50.0);
    }

    #[test]
    fn test_synthesizes_when_graph_empty_or_not_array() {
        for graph in [json!({"graph": []}), json!({"graph": "nope"}), json!(null)] {
            let raw = doc(json!({"summary": {"extracted_price": 10.0}, "graph": graph}));
            let data = assemble(&raw, "A", "MAX").unwrap();
            assert_eq!(data.graph.graph.len(), 100);
            assert_eq!(data.graph.graph.last().unwrap().price, 10.0);
        }
    }

    #[test]
    fn test_uses_real_series_and_requested_timespan() {
        let raw = doc(json!({
            "summary": {"price": {"current": 101.0, "previous_close": 100.0}},
            "graph": {
                "timespan": "1D",
                "previous_close": 99.5,
                "graph": [
                    {"timestamp": 1_704_465_000, "price": 100.5},
                    {"timestamp": 1_704_468_600, "price": 101.0}
                ]
            }
        }));
        let data = assemble(&raw, "A", "5D").unwrap();

        assert_eq!(data.graph.timespan, "5D");
        assert_eq!(data.graph.previous_close, 99.5);
        assert_eq!(data.graph.graph.len(), 2);
        assert_eq!(data.graph.graph[0].price, 100.5);
        assert_eq!(data.graph.graph[0].date, "Fri 02:30 PM");
    }

    #[test]
    fn test_unusable_points_are_dropped() {
        let raw = doc(json!({
            "summary": {"price": {"current": 5.0}},
            "graph": {"graph": [
                {"timestamp": 1, "price": 0},
                {"price": 3.0},
                {"timestamp": 2, "price": "4.5"}
            ]}
        }));
        let data = assemble(&raw, "A", "1D").unwrap();
        assert_eq!(data.graph.graph.len(), 1);
        assert_eq!(data.graph.graph[0].price, 4.5);
    }

    #[test]
    fn test_all_points_unusable_synthesizes() {
        let raw = doc(json!({
            "summary": {"price": {"current": 5.0}},
            "graph": {"graph": [{"timestamp": "x", "price": -1}]}
        }));
        let data = assemble(&raw, "A", "1D").unwrap();
        assert_eq!(data.graph.graph.len(), 24);
    }

    #[test]
    fn test_unknown_range_passes_through() {
        let raw = doc(json!({"summary": {"price": {"current": 5.0}}}));
        let data = assemble(&raw, "A", "10Y").unwrap();
        assert_eq!(data.graph.timespan, "10Y");
        assert_eq!(data.graph.graph.len(), 20);
    }

    #[test]
    fn test_identity_from_document() {
        let raw = doc(json!({
            "title": "Apple Inc",
            "stock": "AAPL",
            "exchange": "NASDAQ",
            "summary": {}
        }));
        let data = assemble(&raw, "whatever", "1D").unwrap();
        assert_eq!(data.title, "Apple Inc");
        assert_eq!(data.stock, "AAPL");
        assert_eq!(data.exchange, "NASDAQ");
    }

    #[test]
    fn test_identity_from_symbol() {
        let raw = doc(json!({"summary": {}}));
        let data = assemble(&raw, "TSLA:NASDAQ", "1D").unwrap();
        assert_eq!(data.title, "TSLA:NASDAQ Stock");
        assert_eq!(data.stock, "TSLA");
        assert_eq!(data.exchange, "NASDAQ");

        let data = assemble(&raw, "TSLA", "1D").unwrap();
        assert_eq!(data.exchange, "UNKNOWN");
        let data = assemble(&raw, "TSLA:", "1D").unwrap();
        assert_eq!(data.exchange, "UNKNOWN");
    }

    #[test]
    fn test_check_search_status() {
        assert!(check_search_status(&doc(json!({}))).is_ok());
        let ok = doc(json!({"search_metadata": {"status": "Success"}}));
        assert!(check_search_status(&ok).is_ok());

        let failed = doc(json!({"search_metadata": {"status": "Error"}}));
        let err = check_search_status(&failed).unwrap_err();
        assert!(matches!(err, MarketDataError::UpstreamStatus { ref status } if status == "Error"));
    }

    #[test]
    fn test_every_leaf_is_populated() {
        let raw = doc(json!({"summary": {"price": "123.45"}}));
        let data = assemble(&raw, "A:B", "1Y").unwrap();
        let value = serde_json::to_value(&data).unwrap();

        fn no_nulls(v: &Value) -> bool {
            match v {
                Value::Null => false,
                Value::Array(items) => items.iter().all(no_nulls),
                Value::Object(map) => map.values().all(no_nulls),
                _ => true,
            }
        }
        assert!(no_nulls(&value));
        assert_eq!(data.summary.price.current, 123.45);
        assert_eq!(data.summary.currency, "$");
        assert_eq!(data.summary.market.status, "Unknown");
    }
}
