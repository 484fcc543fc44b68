//! Market aggregation: direct listings + trend groupings -> six buckets.

use std::collections::HashSet;

use log::{debug, warn};
use serde_json::Value;

use super::fallback::FallbackMarkets;
use crate::models::{MarketIndex, MarketTrend, ProcessedMarketData, RawMarketsDocument, Region};

/// Maps a free-text trend title to the bucket it feeds.
///
/// Case-insensitive substring match, checked in this order:
/// "americas"/"america" -> us, "europe"/"emea" -> europe,
/// "asia"/"pacific" -> asia. Anything else maps to nothing.
pub fn classify_trend(title: &str) -> Option<Region> {
    let title = title.to_lowercase();
    if title.contains("americas") || title.contains("america") {
        Some(Region::Us)
    } else if title.contains("europe") || title.contains("emea") {
        Some(Region::Europe)
    } else if title.contains("asia") || title.contains("pacific") {
        Some(Region::Asia)
    } else {
        None
    }
}

/// Parses an array of index listings, skipping entries that are not objects.
///
/// Returns `None` when `value` is not an array.
fn parse_indices(value: &Value, context: &str) -> Option<Vec<MarketIndex>> {
    let entries = value.as_array()?;
    let indices = entries
        .iter()
        .filter_map(|entry| {
            if !entry.is_object() {
                warn!("Skipping non-object listing in {}: {}", context, entry);
                return None;
            }
            match serde_json::from_value::<MarketIndex>(entry.clone()) {
                Ok(index) => Some(index),
                Err(e) => {
                    warn!("Skipping unreadable listing in {}: {}", context, e);
                    None
                }
            }
        })
        .collect();
    Some(indices)
}

/// Reads the trend list, dropping entries without a usable results array.
pub fn parse_trends(raw: &RawMarketsDocument) -> Vec<MarketTrend> {
    let Some(trends) = raw.market_trends.as_ref().and_then(Value::as_array) else {
        return Vec::new();
    };

    trends
        .iter()
        .filter_map(|trend| {
            let title = trend
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let results = trend.get("results").and_then(|r| parse_indices(r, &title))?;
            Some(MarketTrend { title, results })
        })
        .collect()
}

/// Keeps the first listing of every identifier, preserving order.
pub fn dedup_by_identifier(indices: Vec<MarketIndex>) -> Vec<MarketIndex> {
    let mut seen = HashSet::new();
    indices
        .into_iter()
        .filter(|index| seen.insert(index.identifier().to_string()))
        .collect()
}

/// Deduplicates every bucket independently.
pub fn dedup_buckets(mut data: ProcessedMarketData) -> ProcessedMarketData {
    for region in Region::ALL {
        let bucket = std::mem::take(data.bucket_mut(region));
        let before = bucket.len();
        let deduped = dedup_by_identifier(bucket);
        if deduped.len() != before {
            debug!("Removed {} duplicates from {}", before - deduped.len(), region);
        }
        *data.bucket_mut(region) = deduped;
    }
    data
}

/// Merges a raw markets document into the six canonical buckets.
///
/// 1. Each known region key holding an array is copied in order.
/// 2. Trend results are appended to us/europe/asia by title; unmatched
///    trends are dropped. Trends never feed currencies, crypto or futures.
/// 3. Every bucket keeps only the first listing of each identifier.
///
/// An empty result is not an error; see [`resolve_markets`] for the
/// fallback policy.
pub fn aggregate_markets(raw: &RawMarketsDocument) -> ProcessedMarketData {
    let mut processed = ProcessedMarketData::default();

    if let Some(markets) = raw.markets.as_ref() {
        for region in Region::ALL {
            let Some(listings) = markets.get(region.as_str()) else {
                continue;
            };
            if let Some(indices) = parse_indices(listings, region.as_str()) {
                debug!("Added {} {} listings", indices.len(), region);
                processed.bucket_mut(region).extend(indices);
            }
        }
    }

    for trend in parse_trends(raw) {
        match classify_trend(&trend.title) {
            Some(region) => {
                debug!(
                    "Merging trend '{}' ({} results) into {}",
                    trend.title,
                    trend.results.len(),
                    region
                );
                processed.bucket_mut(region).extend(trend.results);
            }
            None => debug!("Dropping unclassified trend '{}'", trend.title),
        }
    }

    let processed = dedup_buckets(processed);
    debug!("Aggregated markets: {} total items", processed.total_len());
    processed
}

/// Where the markets payload came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketsSource {
    Upstream,
    Fallback,
}

/// Markets payload plus its provenance.
#[derive(Clone, Debug)]
pub struct MarketsOutcome {
    pub data: ProcessedMarketData,
    pub source: MarketsSource,
    /// Item count of the aggregate before any substitution.
    pub aggregated_total: usize,
}

/// Applies the caller-side policy: an upstream error or an empty aggregate is
/// replaced by the fallback dataset for `region`.
pub fn resolve_markets(
    raw: &RawMarketsDocument,
    region: Region,
    fallback: &FallbackMarkets,
) -> MarketsOutcome {
    if let Some(error) = raw.error.as_deref() {
        warn!("Upstream markets error, using fallback data: {}", error);
        return MarketsOutcome {
            data: fallback.for_region(region),
            source: MarketsSource::Fallback,
            aggregated_total: 0,
        };
    }

    let data = aggregate_markets(raw);
    let total = data.total_len();
    if total == 0 {
        warn!("No markets data in upstream response, using fallback data");
        return MarketsOutcome {
            data: fallback.for_region(region),
            source: MarketsSource::Fallback,
            aggregated_total: 0,
        };
    }

    MarketsOutcome {
        data,
        source: MarketsSource::Upstream,
        aggregated_total: total,
    }
}
