use log::debug;
use serde_json::Value;

use super::chain::{extract_number, extract_text, NumericField, TextField};
use crate::models::{Movement, StockMarket, StockMovement, StockPrice, StockSummary};

/// Builds the canonical summary from a raw summary section.
///
/// Never fails: every leaf is resolved through its chain and, at worst, set
/// to its default. Derived values only fill gaps, they never replace a
/// non-zero value read from the document:
/// - previous close = `current - change` when the document has no previous
///   close but has a current price and a change
/// - change and change-percent from current and previous close when the
///   document reports neither
///
/// The movement follows the sign of the change, or of the change-percent
/// when the change is zero.
pub fn extract_summary(summary: &Value) -> StockSummary {
    let current = extract_number(summary, NumericField::CurrentPrice);
    let mut previous_close = extract_number(summary, NumericField::PreviousClose);
    let mut change = extract_number(summary, NumericField::Change);
    let mut change_percent = extract_number(summary, NumericField::ChangePercent);

    if previous_close == 0.0 && current > 0.0 && change != 0.0 && current - change > 0.0 {
        previous_close = current - change;
        debug!("Derived previous close {} from current and change", previous_close);
    }

    if change == 0.0 && change_percent == 0.0 && current > 0.0 && previous_close > 0.0 {
        change = current - previous_close;
        change_percent = change / previous_close * 100.0;
        debug!(
            "Derived change {} ({}%) from current and previous close",
            change, change_percent
        );
    }

    let direction = if change != 0.0 { change } else { change_percent };

    StockSummary {
        currency: extract_text(summary, TextField::Currency),
        price: StockPrice {
            current,
            previous_close,
            change,
            change_percent,
        },
        market: StockMarket {
            status: extract_text(summary, TextField::MarketStatus),
            price_movement: StockMovement {
                value: change,
                percentage: change_percent,
                movement: Movement::from_change(direction),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_derives_change_when_both_zero() {
        let summary = extract_summary(&json!({
            "price": {"current": 110.0, "previous_close": 100.0, "change": 0, "change_percent": 0}
        }));
        assert_close(summary.price.change, 10.0);
        assert_close(summary.price.change_percent, 10.0);
        assert_eq!(summary.market.price_movement.movement, Movement::Up);
        assert_close(summary.market.price_movement.value, 10.0);
    }

    #[test]
    fn test_derived_negative_change_is_down() {
        let summary = extract_summary(&json!({
            "price": {"current": 90.0, "previous_close": 100.0}
        }));
        assert_close(summary.price.change, -10.0);
        assert_close(summary.price.change_percent, -10.0);
        assert_eq!(summary.market.price_movement.movement, Movement::Down);
    }

    #[test]
    fn test_explicit_change_is_not_overwritten() {
        let summary = extract_summary(&json!({
            "price": {"current": 110.0, "previous_close": 100.0, "change": 4.0, "change_percent": 0}
        }));
        assert_eq!(summary.price.change, 4.0);
        assert_eq!(summary.price.change_percent, 0.0);
    }

    #[test]
    fn test_no_derivation_without_prices() {
        let summary = extract_summary(&json!({"price": {"current": 110.0}}));
        assert_eq!(summary.price.previous_close, 0.0);
        assert_eq!(summary.price.change, 0.0);
        assert_eq!(summary.price.change_percent, 0.0);
        assert_eq!(summary.market.price_movement.movement, Movement::Up);
    }

    #[test]
    fn test_previous_close_derived_from_change() {
        let summary = extract_summary(&json!({
            "extracted_price": 50.0,
            "market": {"price_movement": {"value": 5.0, "percentage": 11.11, "movement": "Up"}}
        }));
        assert_close(summary.price.previous_close, 45.0);
        assert_eq!(summary.price.change, 5.0);
        assert_eq!(summary.price.change_percent, 11.11);
    }

    #[test]
    fn test_percent_only_movement_follows_percent() {
        let summary = extract_summary(&json!({
            "market": {"price_movement": {"percentage": 2.0, "movement": "Down"}}
        }));
        assert_eq!(summary.price.change, 0.0);
        assert_eq!(summary.price.change_percent, -2.0);
        assert_eq!(summary.market.price_movement.movement, Movement::Down);
    }

    #[test]
    fn test_empty_summary_is_fully_defaulted() {
        let summary = extract_summary(&json!({}));
        assert_eq!(summary.currency, "$");
        assert_eq!(summary.market.status, "Unknown");
        assert_eq!(summary.price, StockPrice::default());
        assert_eq!(summary.market.price_movement.movement, Movement::Up);
    }

    #[test]
    fn test_non_object_summary_is_fully_defaulted() {
        let summary = extract_summary(&json!("garbage"));
        assert_eq!(summary.price.current, 0.0);
        assert_eq!(summary.currency, "$");
    }

    #[test]
    fn test_typical_google_finance_summary() {
        let summary = extract_summary(&json!({
            "title": "Apple Inc",
            "stock": "AAPL",
            "exchange": "NASDAQ",
            "price": "$189.84",
            "extracted_price": 189.84,
            "currency": "$",
            "market": {
                "trading": "Closed",
                "price": "$189.50",
                "extracted_price": 189.5,
                "price_movement": {"percentage": 0.42, "value": 0.8, "movement": "Down"}
            }
        }));
        assert_eq!(summary.price.current, 189.84);
        assert_eq!(summary.price.change, -0.8);
        assert_eq!(summary.price.change_percent, -0.42);
        assert_close(summary.price.previous_close, 190.64);
        assert_eq!(summary.market.status, "Closed");
        assert_eq!(summary.market.price_movement.movement, Movement::Down);
    }
}
