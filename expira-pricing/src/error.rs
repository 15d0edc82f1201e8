use chrono::{DateTime, Utc};
use expira_catalog::AttributeError;

/// Pricing failures
///
/// All variants are recoverable: callers fall back to the base price with
/// zero discount rather than failing a listing render.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("invalid product attributes: {0}")]
    InvalidAttributes(#[from] AttributeError),

    #[error("evaluation time {now} precedes product timeline start {start}")]
    ClockSkew {
        now: DateTime<Utc>,
        start: DateTime<Utc>,
    },

    #[error("computed price {price} outside [{floor}, {upper}]")]
    OutOfRangeResult { price: f64, floor: f64, upper: f64 },
}
