//! Static market data served when the upstream has nothing usable.
//!
//! This table is configuration, not logic: the aggregator never reads it.
//! Callers inject it into [`resolve_markets`](super::resolve_markets).

use crate::models::{MarketIndex, ProcessedMarketData, Region};

/// Number of us listings kept alongside a non-us region's fallback.
const US_COMPANION_COUNT: usize = 2;

/// Canned per-region listings.
#[derive(Clone, Debug)]
pub struct FallbackMarkets {
    data: ProcessedMarketData,
}

impl FallbackMarkets {
    /// Wraps a caller-provided table.
    pub fn new(data: ProcessedMarketData) -> Self {
        Self { data }
    }

    /// The built-in table of major indices, currencies, coins and futures.
    pub fn standard() -> Self {
        let data = ProcessedMarketData {
            us: vec![
                MarketIndex::new(
                    ".DJI:INDEXDJX",
                    "Dow Jones Industrial Average",
                    34000.0,
                    "USD",
                    0.5,
                    170.0,
                ),
                MarketIndex::new(".INX:INDEXSP", "S&P 500", 4200.0, "USD", 0.3, 12.5),
                MarketIndex::new(
                    ".IXIC:INDEXNASDAQ",
                    "NASDAQ Composite",
                    13000.0,
                    "USD",
                    -0.2,
                    -26.0,
                ),
            ],
            europe: vec![
                MarketIndex::new("UKX:INDEXFTSE", "FTSE 100", 7500.0, "GBP", 0.4, 30.0),
                MarketIndex::new("DAX:INDEXDB", "DAX", 15000.0, "EUR", -0.1, -15.0),
            ],
            asia: vec![
                MarketIndex::new("N225:INDEXNIKKEI", "Nikkei 225", 28000.0, "JPY", 0.8, 224.0),
                MarketIndex::new("SENSEX:INDEXBOM", "BSE Sensex", 60000.0, "INR", 0.6, 360.0),
            ],
            currencies: vec![
                MarketIndex::new("EURUSD:CUR", "EUR/USD", 1.08, "USD", 0.2, 0.002),
                MarketIndex::new("GBPUSD:CUR", "GBP/USD", 1.25, "USD", -0.1, -0.001),
            ],
            crypto: vec![
                MarketIndex::new("BTC-USD:CRYPTO", "Bitcoin", 45000.0, "USD", 2.5, 1125.0),
                MarketIndex::new("ETH-USD:CRYPTO", "Ethereum", 3000.0, "USD", 1.8, 54.0),
            ],
            futures: vec![
                MarketIndex::new("CL=F:NYMEX", "Crude Oil", 75.0, "USD", -1.2, -0.9),
                MarketIndex::new("GC=F:COMEX", "Gold", 1950.0, "USD", 0.3, 5.85),
            ],
        };
        Self { data }
    }

    /// The full table.
    pub fn all(&self) -> &ProcessedMarketData {
        &self.data
    }

    /// The table as served for a requested region.
    ///
    /// Every bucket is included; for europe and asia the us bucket is cut to
    /// its first two listings.
    pub fn for_region(&self, region: Region) -> ProcessedMarketData {
        let mut data = self.data.clone();
        if matches!(region, Region::Europe | Region::Asia) {
            data.us.truncate(US_COMPANION_COUNT);
        }
        data
    }
}

impl Default for FallbackMarkets {
    fn default() -> Self {
        Self::standard()
    }
}
