use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::{CategoryAttributes, Product};

/// Stock level relative to the product's reorder threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Healthy,
    Low,
    OutOfStock,
}

/// Whether a product can currently be offered for sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sellability {
    Sellable,
    Expired,
    EventStarted,
    SoldOut,
    OutOfStock,
}

/// Classify current stock against the product's minimum threshold
pub fn stock_status(product: &Product) -> StockStatus {
    if product.current_stock == 0 {
        return StockStatus::OutOfStock;
    }
    match product.min_stock_threshold {
        Some(threshold) if product.current_stock <= threshold => StockStatus::Low,
        _ => StockStatus::Healthy,
    }
}

/// Sellability check at an explicit evaluation instant.
///
/// Perishables past expiry and events that have started (or sold out) are
/// flagged unsellable; subscriptions have no time cutoff.
pub fn sellability(product: &Product, now: DateTime<Utc>) -> Sellability {
    match &product.attributes {
        CategoryAttributes::Perishable(attrs) => {
            let expiry = attrs.expiry_date.and_time(NaiveTime::MIN).and_utc();
            if now >= expiry {
                Sellability::Expired
            } else if product.current_stock == 0 {
                Sellability::OutOfStock
            } else {
                Sellability::Sellable
            }
        }
        CategoryAttributes::Event(attrs) => {
            if now >= attrs.event_date {
                Sellability::EventStarted
            } else if attrs.available_seats() == 0 {
                Sellability::SoldOut
            } else {
                Sellability::Sellable
            }
        }
        CategoryAttributes::Subscription(_) => Sellability::Sellable,
    }
}
