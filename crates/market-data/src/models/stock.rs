use serde::{Deserialize, Serialize};

use super::market::Movement;

/// Canonical price block of a stock summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub current: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Resolved price move, always fully populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub value: f64,
    pub percentage: f64,
    pub movement: Movement,
}

/// Market status block of a stock summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockMarket {
    pub status: String,
    pub price_movement: StockMovement,
}

/// Canonical summary produced by the field extractor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub currency: String,
    pub price: StockPrice,
    pub market: StockMarket,
}

/// One chart point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    /// Unix seconds
    pub timestamp: i64,
    pub price: f64,
    /// Display label from the date bucketer
    pub date: String,
}

/// Chart series for one stock, real or synthesized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockGraph {
    /// The requested range token.
    pub timespan: String,
    pub previous_close: f64,
    pub graph: Vec<GraphPoint>,
}

/// Normalized stock record returned to the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    pub title: String,
    pub stock: String,
    pub exchange: String,
    pub summary: StockSummary,
    pub graph: StockGraph,
}
