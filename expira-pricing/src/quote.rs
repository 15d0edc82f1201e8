use chrono::{DateTime, Utc};
use expira_catalog::ProductCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Effective price for one product at one evaluation instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub product_id: Uuid,
    pub category: ProductCategory,
    pub base_price: f64,
    pub floor_price: f64,
    pub discounted_price: f64,
    /// Rounded percentage shown to the UI; negative under event surge pricing
    pub discount_percent: i32,
    pub computed_at: DateTime<Utc>,
    pub trace: QuoteTrace,
}

/// Per-factor scores behind a quote, for audit logging only.
///
/// Fields are populated per category and never feed back into the price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteTrace {
    pub remaining_life_fraction: Option<f64>,
    pub demand_trend_score: Option<f64>,
    pub stock_clearance_score: Option<f64>,
    pub urgency_fraction: Option<f64>,
    pub occupancy_fraction: Option<f64>,
    pub renewal_rate: Option<f64>,
}

/// Round a price to whole cents
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage shown to the UI: round((base - discounted) / base * 100)
pub(crate) fn discount_percent(base_price: f64, discounted_price: f64) -> i32 {
    ((base_price - discounted_price) / base_price * 100.0).round() as i32
}
