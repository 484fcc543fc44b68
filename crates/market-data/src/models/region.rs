use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::market::MarketIndex;

/// One of the six market buckets shown by the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Europe,
    Asia,
    Currencies,
    Crypto,
    Futures,
}

impl Region {
    /// All buckets, in output order.
    pub const ALL: [Region; 6] = [
        Region::Us,
        Region::Europe,
        Region::Asia,
        Region::Currencies,
        Region::Crypto,
        Region::Futures,
    ];

    /// Key of the bucket in both the raw `markets` map and the output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::Currencies => "currencies",
            Region::Crypto => "crypto",
            Region::Futures => "futures",
        }
    }

    /// Case-insensitive parse. `americas` is accepted as an alias of `us`.
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "us" | "americas" => Some(Region::Us),
            "europe" => Some(Region::Europe),
            "asia" => Some(Region::Asia),
            "currencies" => Some(Region::Currencies),
            "crypto" => Some(Region::Crypto),
            "futures" => Some(Region::Futures),
            _ => None,
        }
    }

    /// Country (`gl`) parameter used when querying the markets engine.
    pub fn country_code(&self) -> &'static str {
        match self {
            Region::Europe => "gb",
            Region::Asia => "jp",
            Region::Us | Region::Currencies | Region::Crypto | Region::Futures => "us",
        }
    }

    /// Trend parameter used when querying the markets engine.
    pub fn trend(&self) -> &'static str {
        match self {
            Region::Us | Region::Europe | Region::Asia => "indexes",
            Region::Currencies | Region::Futures => "most-active",
            Region::Crypto => "crypto",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::parse(s).ok_or_else(|| format!("Unknown region: {}", s))
    }
}

/// Canonical per-region market listings.
///
/// Exactly six buckets, each duplicate-free by identifier once produced by
/// the aggregator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMarketData {
    pub us: Vec<MarketIndex>,
    pub europe: Vec<MarketIndex>,
    pub asia: Vec<MarketIndex>,
    pub currencies: Vec<MarketIndex>,
    pub crypto: Vec<MarketIndex>,
    pub futures: Vec<MarketIndex>,
}

impl ProcessedMarketData {
    pub fn bucket(&self, region: Region) -> &[MarketIndex] {
        match region {
            Region::Us => &self.us,
            Region::Europe => &self.europe,
            Region::Asia => &self.asia,
            Region::Currencies => &self.currencies,
            Region::Crypto => &self.crypto,
            Region::Futures => &self.futures,
        }
    }

    pub fn bucket_mut(&mut self, region: Region) -> &mut Vec<MarketIndex> {
        match region {
            Region::Us => &mut self.us,
            Region::Europe => &mut self.europe,
            Region::Asia => &mut self.asia,
            Region::Currencies => &mut self.currencies,
            Region::Crypto => &mut self.crypto,
            Region::Futures => &mut self.futures,
        }
    }

    /// Sum of all bucket lengths.
    pub fn total_len(&self) -> usize {
        Region::ALL.iter().map(|r| self.bucket(*r).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}
