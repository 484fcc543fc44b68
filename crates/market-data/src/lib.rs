//! Tickerboard Market Data Crate
//!
//! This crate turns raw Google Finance documents (as returned through
//! SerpAPI) into the canonical shapes the Tickerboard dashboard renders.
//!
//! # Overview
//!
//! The market data crate provides:
//! - Market listings aggregation with per-region deduplication
//! - Summary field extraction over an unstable upstream schema
//! - Synthetic price series when the upstream returns no graph
//! - A static fallback dataset for when the upstream has nothing at all
//!
//! # Architecture
//!
//! ```text
//! RawMarketsDocument                 RawStockDocument
//!         |                                  |
//!         v                                  v
//! +------------------+             +------------------+
//! |    Aggregator    |             |    Assembler     |
//! +------------------+             +------------------+
//!         |                          |       |       |
//!         |                          v       v       v
//!         |                    Extractor  Labels  Synthesizer
//!         v                                  |
//! ProcessedMarketData                        v
//!                                        StockData
//! ```
//!
//! Every operation is a stateless transform of one document. Only the
//! synthesizer is impure (randomness, wall clock), and both are injectable.
//!
//! # Core Types
//!
//! - [`MarketIndex`] - One listing, keyed by its exchange-qualified identifier
//! - [`ProcessedMarketData`] - The six canonical buckets
//! - [`StockData`] - Normalized stock record with summary and graph
//! - [`TimeRange`] - Requested chart range and its resolution

pub mod aggregate;
pub mod assemble;
pub mod errors;
pub mod extract;
pub mod models;
pub mod series;

pub use models::{
    GraphPoint, MarketIndex, MarketTrend, Movement, PriceMovement, ProcessedMarketData,
    RawMarketsDocument, RawStockDocument, Region, Resolution, StockData, StockGraph, StockMarket,
    StockMovement, StockPrice, StockSummary, TimeRange,
};

pub use aggregate::{
    aggregate_markets, classify_trend, resolve_markets, FallbackMarkets, MarketsOutcome,
    MarketsSource,
};
pub use assemble::{assemble_stock, assemble_stock_with, check_search_status};
pub use errors::{ErrorClass, MarketDataError};
pub use extract::{extract_number, extract_summary, extract_text, NumericField, TextField};
pub use series::{
    format_label, synthesize_series, synthesize_series_now, FixedJitter, Jitter, RandomJitter,
};
