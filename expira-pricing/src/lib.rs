pub mod engine;
pub mod error;
pub mod quote;

pub use engine::{PricingConfig, PricingEngine};
pub use error::PricingError;
pub use quote::{PriceQuote, QuoteTrace};
