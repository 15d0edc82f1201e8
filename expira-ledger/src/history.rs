use chrono::{DateTime, Utc};
use expira_pricing::PriceQuote;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One applied discount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub discount_percent: i32,
    pub original_price: f64,
    pub discounted_price: f64,
    pub applied_at: DateTime<Utc>,
    pub applied_by: String,
}

/// In-memory discount history, one timeline per product.
///
/// Unchanged percentages are not re-recorded, so each timeline only holds
/// actual price movements.
pub struct DiscountHistory {
    records: HashMap<Uuid, Vec<DiscountRecord>>,
}

impl DiscountHistory {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Record a quote; returns false when the percentage is unchanged
    pub fn record(&mut self, quote: &PriceQuote, applied_by: &str) -> bool {
        let timeline = self.records.entry(quote.product_id).or_default();

        if let Some(last) = timeline.last() {
            if last.discount_percent == quote.discount_percent {
                return false;
            }
        }

        timeline.push(DiscountRecord {
            id: Uuid::new_v4(),
            product_id: quote.product_id,
            discount_percent: quote.discount_percent,
            original_price: quote.base_price,
            discounted_price: quote.discounted_price,
            applied_at: quote.computed_at,
            applied_by: applied_by.to_string(),
        });

        tracing::debug!(
            product_id = %quote.product_id,
            percent = quote.discount_percent,
            "recorded discount change"
        );

        true
    }

    /// Latest applied discount for a product
    pub fn latest(&self, product_id: &Uuid) -> Option<&DiscountRecord> {
        self.records.get(product_id).and_then(|t| t.last())
    }

    /// Full timeline for a product, oldest first
    pub fn records(&self, product_id: &Uuid) -> &[DiscountRecord] {
        self.records
            .get(product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop a product's timeline; returns the number of removed records
    pub fn prune_product(&mut self, product_id: &Uuid) -> usize {
        self.records.remove(product_id).map_or(0, |t| t.len())
    }
}

impl Default for DiscountHistory {
    fn default() -> Self {
        Self::new()
    }
}
