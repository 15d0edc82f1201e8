use chrono::{DateTime, Utc};
use expira_pricing::{PriceQuote, QuoteTrace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One pricing evaluation with its per-factor scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    pub trace: QuoteTrace,
    pub discount_percent: i32,
    pub calculated_at: DateTime<Utc>,
}

/// Append-only audit log of pricing evaluations
pub struct CalculationLog {
    entries: HashMap<Uuid, Vec<CalculationEntry>>,
}

impl CalculationLog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Log every evaluation, including repeats of the same percentage
    pub fn log(&mut self, quote: &PriceQuote) {
        self.entries
            .entry(quote.product_id)
            .or_default()
            .push(CalculationEntry {
                id: Uuid::new_v4(),
                product_id: quote.product_id,
                trace: quote.trace.clone(),
                discount_percent: quote.discount_percent,
                calculated_at: quote.computed_at,
            });
    }

    /// Evaluations for a product, oldest first
    pub fn entries(&self, product_id: &Uuid) -> &[CalculationEntry] {
        self.entries
            .get(product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop entries older than the cutoff; returns the removed count
    pub fn prune_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, timeline| {
            let before = timeline.len();
            timeline.retain(|entry| entry.calculated_at >= cutoff);
            removed += before - timeline.len();
            !timeline.is_empty()
        });
        removed
    }
}

impl Default for CalculationLog {
    fn default() -> Self {
        Self::new()
    }
}
