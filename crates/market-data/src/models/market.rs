use serde::{Deserialize, Serialize};

use super::de;

/// Direction of a price move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    Up,
    Down,
}

impl Movement {
    /// Case-insensitive parse of the upstream tag. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Movement::Up),
            "down" => Some(Movement::Down),
            _ => None,
        }
    }

    /// `Up` for non-negative changes, `Down` otherwise.
    pub fn from_change(change: f64) -> Self {
        if change >= 0.0 {
            Movement::Up
        } else {
            Movement::Down
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Movement::Up => "Up",
            Movement::Down => "Down",
        }
    }
}

/// Price move attached to a market index listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceMovement {
    #[serde(default, deserialize_with = "de::f64_or_zero")]
    pub percentage: f64,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_f64"
    )]
    pub value: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_movement"
    )]
    pub movement: Option<Movement>,
}

/// A market index (or currency pair, coin, future) as listed by the upstream.
///
/// `stock` is the exchange-qualified identifier (e.g. `".DJI:INDEXDJX"`) and
/// is the deduplication key: two listings with the same `stock` are the same
/// instrument whatever their other fields say.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    #[serde(default, deserialize_with = "de::string_or_default")]
    pub stock: String,

    #[serde(default, deserialize_with = "de::string_or_default")]
    pub name: String,

    #[serde(default, deserialize_with = "de::string_or_default")]
    pub link: String,

    #[serde(default, deserialize_with = "de::string_or_default")]
    pub serpapi_link: String,

    #[serde(default, deserialize_with = "de::non_negative_f64")]
    pub price: f64,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_string"
    )]
    pub currency: Option<String>,

    #[serde(default, deserialize_with = "de::or_default")]
    pub price_movement: PriceMovement,
}

impl MarketIndex {
    /// Builds a fully specified listing; used by the static fallback table.
    pub fn new(
        stock: &str,
        name: &str,
        price: f64,
        currency: &str,
        percentage: f64,
        value: f64,
    ) -> Self {
        Self {
            stock: stock.to_string(),
            name: name.to_string(),
            link: "#".to_string(),
            serpapi_link: "#".to_string(),
            price,
            currency: Some(currency.to_string()),
            price_movement: PriceMovement {
                percentage,
                value: Some(value),
                movement: Some(Movement::from_change(value)),
            },
        }
    }

    pub fn identifier(&self) -> &str {
        &self.stock
    }
}

/// Free-form regional grouping from the upstream `market_trends` list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketTrend {
    #[serde(default, deserialize_with = "de::string_or_default")]
    pub title: String,

    #[serde(default, deserialize_with = "de::or_default")]
    pub results: Vec<MarketIndex>,
}
