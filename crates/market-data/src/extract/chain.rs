//! Accessor chains - ordered lookups over a loosely-typed summary document.
//!
//! Each logical field has a fixed list of places it may live. The chain tries
//! them in order and stops at the first non-falsy value; `0`, empty strings,
//! `null` and wrong shapes are all falsy and simply skipped.
//!
//! Order within every numeric chain:
//! 1. Directly extracted numeric fields (`extracted_price`, flat fields)
//! 2. Fields of the nested price/market objects
//! 3. Stringified numbers, parsed
//! 4. The default (`0`)

use serde_json::Value;

use crate::models::de::{parse_numeric_str, text_from_value};
use crate::models::Movement;

/// Numeric fields of a stock summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericField {
    CurrentPrice,
    PreviousClose,
    Change,
    ChangePercent,
}

/// Text fields of a stock summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    Currency,
    MarketStatus,
}

/// Default currency when the summary names none.
pub const DEFAULT_CURRENCY: &str = "$";

/// Default market status when the summary reports none.
pub const DEFAULT_STATUS: &str = "Unknown";

/// One attempt in a chain.
#[derive(Clone, Copy, Debug)]
enum Accessor {
    /// A JSON number at the path.
    Number(&'static [&'static str]),
    /// A JSON number inside a `price_movement` object, signed by its sibling
    /// `movement` tag. The upstream reports magnitudes there.
    SignedMovement(&'static [&'static str]),
    /// A string at the path holding a number.
    NumericText(&'static [&'static str]),
    /// A non-empty string at the path.
    Text(&'static [&'static str]),
}

const CURRENT_PRICE_CHAIN: &[Accessor] = &[
    Accessor::Number(&["extracted_price"]),
    Accessor::Number(&["price"]),
    Accessor::Number(&["price", "current"]),
    Accessor::Number(&["market", "extracted_price"]),
    Accessor::NumericText(&["price"]),
    Accessor::NumericText(&["price", "current"]),
    Accessor::NumericText(&["market", "price"]),
];

const PREVIOUS_CLOSE_CHAIN: &[Accessor] = &[
    Accessor::Number(&["extracted_previous_close"]),
    Accessor::Number(&["previous_close"]),
    Accessor::Number(&["price", "previous_close"]),
    Accessor::Number(&["market", "previous_close"]),
    Accessor::NumericText(&["previous_close"]),
    Accessor::NumericText(&["price", "previous_close"]),
];

const CHANGE_CHAIN: &[Accessor] = &[
    Accessor::Number(&["change"]),
    Accessor::Number(&["price", "change"]),
    Accessor::SignedMovement(&["market", "price_movement", "value"]),
    Accessor::SignedMovement(&["price_movement", "value"]),
    Accessor::NumericText(&["change"]),
    Accessor::NumericText(&["price", "change"]),
];

const CHANGE_PERCENT_CHAIN: &[Accessor] = &[
    Accessor::Number(&["change_percent"]),
    Accessor::Number(&["price", "change_percent"]),
    Accessor::SignedMovement(&["market", "price_movement", "percentage"]),
    Accessor::SignedMovement(&["price_movement", "percentage"]),
    Accessor::NumericText(&["change_percent"]),
    Accessor::NumericText(&["price", "change_percent"]),
];

const CURRENCY_CHAIN: &[Accessor] = &[
    Accessor::Text(&["currency"]),
    Accessor::Text(&["price", "currency"]),
    Accessor::Text(&["market", "currency"]),
];

const STATUS_CHAIN: &[Accessor] = &[
    Accessor::Text(&["market", "status"]),
    Accessor::Text(&["market", "trading"]),
    Accessor::Text(&["status"]),
];

impl NumericField {
    fn chain(self) -> &'static [Accessor] {
        match self {
            NumericField::CurrentPrice => CURRENT_PRICE_CHAIN,
            NumericField::PreviousClose => PREVIOUS_CLOSE_CHAIN,
            NumericField::Change => CHANGE_CHAIN,
            NumericField::ChangePercent => CHANGE_PERCENT_CHAIN,
        }
    }
}

impl TextField {
    fn chain(self) -> &'static [Accessor] {
        match self {
            TextField::Currency => CURRENCY_CHAIN,
            TextField::MarketStatus => STATUS_CHAIN,
        }
    }

    fn default_value(self) -> &'static str {
        match self {
            TextField::Currency => DEFAULT_CURRENCY,
            TextField::MarketStatus => DEFAULT_STATUS,
        }
    }
}

/// Follows `path` through nested objects.
pub fn lookup<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |node, key| node.get(key))
}

fn truthy(value: f64) -> Option<f64> {
    (value.is_finite() && value != 0.0).then_some(value)
}

impl Accessor {
    fn number(&self, doc: &Value) -> Option<f64> {
        match self {
            Accessor::Number(path) => lookup(doc, path).and_then(Value::as_f64).and_then(truthy),
            Accessor::SignedMovement(path) => {
                let magnitude = lookup(doc, path).and_then(Value::as_f64).and_then(truthy)?;
                let parent = &path[..path.len() - 1];
                let direction = lookup(doc, parent)
                    .and_then(|p| p.get("movement"))
                    .and_then(Value::as_str)
                    .and_then(Movement::parse);
                match direction {
                    Some(Movement::Down) => Some(-magnitude.abs()),
                    Some(Movement::Up) => Some(magnitude.abs()),
                    None => Some(magnitude),
                }
            }
            Accessor::NumericText(path) => lookup(doc, path)
                .and_then(Value::as_str)
                .and_then(parse_numeric_str)
                .and_then(truthy),
            Accessor::Text(_) => None,
        }
    }

    fn text(&self, doc: &Value) -> Option<String> {
        match self {
            Accessor::Text(path) => lookup(doc, path)
                .filter(|v| v.is_string())
                .and_then(text_from_value),
            _ => None,
        }
    }
}

/// Resolves a numeric field, or `None` when every step of its chain misses.
pub fn find_number(summary: &Value, field: NumericField) -> Option<f64> {
    field.chain().iter().find_map(|accessor| accessor.number(summary))
}

/// Resolves a numeric field, defaulting to `0`.
pub fn extract_number(summary: &Value, field: NumericField) -> f64 {
    find_number(summary, field).unwrap_or(0.0)
}

/// Resolves a text field, defaulting to `"$"` or `"Unknown"`.
pub fn extract_text(summary: &Value, field: TextField) -> String {
    field
        .chain()
        .iter()
        .find_map(|accessor| accessor.text(summary))
        .unwrap_or_else(|| field.default_value().to_string())
}
