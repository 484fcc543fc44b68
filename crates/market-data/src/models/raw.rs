//! Raw upstream documents.
//!
//! Only the top level is typed. Sections whose shape drifts between API
//! versions stay as [`serde_json::Value`] and are read by the extractor and
//! the aggregator through explicit fallback chains.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::de;
use crate::errors::MarketDataError;

/// Response of the `google_finance_markets` engine.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawMarketsDocument {
    /// Map of region key to an array of index listings.
    pub markets: Option<Value>,

    /// Array of `{title, results}` groupings.
    pub market_trends: Option<Value>,

    /// Error string reported by the upstream in place of data.
    #[serde(deserialize_with = "de::opt_string")]
    pub error: Option<String>,
}

/// Response of the `google_finance` engine for a single quote.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawStockDocument {
    #[serde(deserialize_with = "de::opt_string")]
    pub title: Option<String>,

    #[serde(deserialize_with = "de::opt_string")]
    pub stock: Option<String>,

    #[serde(deserialize_with = "de::opt_string")]
    pub exchange: Option<String>,

    pub summary: Option<Value>,

    /// `{timespan, previous_close, graph: [{timestamp, price}]}`
    pub graph: Option<Value>,

    pub search_metadata: Option<Value>,
}

impl RawMarketsDocument {
    pub fn from_value(value: Value) -> Result<Self, MarketDataError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl FromStr for RawMarketsDocument {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

impl RawStockDocument {
    pub fn from_value(value: Value) -> Result<Self, MarketDataError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The summary section, unless absent or `null`.
    pub fn summary(&self) -> Option<&Value> {
        self.summary.as_ref().filter(|v| !v.is_null())
    }

    /// `search_metadata.status`, when reported.
    pub fn search_status(&self) -> Option<&str> {
        self.search_metadata
            .as_ref()
            .and_then(|m| m.get("status"))
            .and_then(Value::as_str)
    }
}

impl FromStr for RawStockDocument {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markets_document_all_optional() {
        let doc: RawMarketsDocument = "{}".parse().unwrap();
        assert!(doc.markets.is_none());
        assert!(doc.market_trends.is_none());
        assert!(doc.error.is_none());
    }

    #[test]
    fn test_markets_document_error_string() {
        let doc = RawMarketsDocument::from_value(json!({"error": "Invalid API key."})).unwrap();
        assert_eq!(doc.error.as_deref(), Some("Invalid API key."));
    }

    #[test]
    fn test_markets_document_rejects_non_object() {
        let result: Result<RawMarketsDocument, _> = "[1, 2]".parse();
        assert!(matches!(result, Err(MarketDataError::InvalidDocument(_))));
    }

    #[test]
    fn test_stock_document_null_summary_is_absent() {
        let doc = RawStockDocument::from_value(json!({"summary": null})).unwrap();
        assert!(doc.summary().is_none());
    }

    #[test]
    fn test_stock_document_identity_and_status() {
        let doc = RawStockDocument::from_value(json!({
            "title": "Apple Inc",
            "stock": "AAPL",
            "exchange": "",
            "search_metadata": {"status": "Success"},
            "summary": {"price": "1"}
        }))
        .unwrap();
        assert_eq!(doc.title.as_deref(), Some("Apple Inc"));
        assert_eq!(doc.stock.as_deref(), Some("AAPL"));
        assert!(doc.exchange.is_none());
        assert_eq!(doc.search_status(), Some("Success"));
        assert!(doc.summary().is_some());
    }

    #[test]
    fn test_stock_document_rejects_invalid_json() {
        let result: Result<RawStockDocument, _> = "{\"summary\":".parse();
        assert!(result.is_err());
    }
}
