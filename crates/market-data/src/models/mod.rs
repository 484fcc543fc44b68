//! Market data models
//!
//! This module contains the data types shared by the pipeline:
//! - `market` - Index listings and trend groupings (MarketIndex, MarketTrend)
//! - `region` - The six output buckets (Region, ProcessedMarketData)
//! - `stock` - Normalized stock record (StockData, StockSummary, StockGraph)
//! - `time_range` - Requested chart range and its resolution (TimeRange)
//! - `raw` - Top-level shapes of the upstream documents
//! - `de` - Lenient deserialization helpers

pub mod de;
mod market;
mod raw;
mod region;
mod stock;
mod time_range;

pub use market::{MarketIndex, MarketTrend, Movement, PriceMovement};
pub use raw::{RawMarketsDocument, RawStockDocument};
pub use region::{ProcessedMarketData, Region};
pub use stock::{
    GraphPoint, StockData, StockGraph, StockMarket, StockMovement, StockPrice, StockSummary,
};
pub use time_range::{LabelStyle, Resolution, TimeRange};
