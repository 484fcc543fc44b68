//! Market listings aggregation and the fallback dataset.

mod fallback;
mod markets;

pub use fallback::FallbackMarkets;
pub use markets::{
    aggregate_markets, classify_trend, dedup_buckets, dedup_by_identifier, parse_trends,
    resolve_markets, MarketsOutcome, MarketsSource,
};
