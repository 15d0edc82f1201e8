use chrono::{DateTime, NaiveTime, Utc};
use expira_catalog::{
    CategoryAttributes, EventAttributes, PerishableAttributes, Product, SubscriptionAttributes,
};
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::quote::{discount_percent, round_cents, PriceQuote, QuoteTrace};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Tunable policy knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Weight of occupancy vs urgency in the event scarcity curve
    pub occupancy_weight: f64,

    /// Liquidation triggers: low occupancy close to the event
    pub liquidation_occupancy_threshold: f64,
    pub liquidation_urgency_threshold: f64,

    /// Multiplier applied when liquidation triggers
    pub liquidation_multiplier: f64,

    /// Tolerance for the post-computation range check
    pub price_epsilon: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            occupancy_weight: 0.4,
            liquidation_occupancy_threshold: 0.3,
            liquidation_urgency_threshold: 0.8,
            liquidation_multiplier: 0.85,
            price_epsilon: 1e-6,
        }
    }
}

/// Discount pricing engine.
///
/// Pure and stateless: every quote is a deterministic function of the product
/// record and the evaluation instant passed in, so concurrent use needs no
/// locking.
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Compute the effective price for a product at `now`
    pub fn quote(&self, product: &Product, now: DateTime<Utc>) -> Result<PriceQuote, PricingError> {
        product.validate()?;

        let (raw_price, upper, trace) = match &product.attributes {
            CategoryAttributes::Perishable(attrs) => self.perishable_price(product, attrs, now)?,
            CategoryAttributes::Event(attrs) => self.event_price(product, attrs, now)?,
            CategoryAttributes::Subscription(attrs) => {
                self.subscription_price(product, attrs, now)?
            }
        };

        let floor_price = round_cents(product.base_price * (1.0 - product.max_profit_margin));
        let discounted_price = round_cents(raw_price).max(floor_price);
        let upper = round_cents(upper);

        if discounted_price < floor_price - self.config.price_epsilon
            || discounted_price > upper + self.config.price_epsilon
        {
            return Err(PricingError::OutOfRangeResult {
                price: discounted_price,
                floor: floor_price,
                upper,
            });
        }

        let quote = PriceQuote {
            product_id: product.id,
            category: product.category(),
            base_price: product.base_price,
            floor_price,
            discounted_price,
            discount_percent: discount_percent(product.base_price, discounted_price),
            computed_at: now,
            trace,
        };

        tracing::debug!(
            product_id = %quote.product_id,
            price = quote.discounted_price,
            percent = quote.discount_percent,
            "priced product"
        );

        Ok(quote)
    }

    /// Quote with base-price fallback.
    ///
    /// Listing renders never fail: any pricing error degrades to the base
    /// price with zero discount.
    pub fn quote_or_base(&self, product: &Product, now: DateTime<Utc>) -> PriceQuote {
        match self.quote(product, now) {
            Ok(quote) => quote,
            Err(err) => {
                tracing::warn!(
                    product_id = %product.id,
                    error = %err,
                    "pricing failed, falling back to base price"
                );
                PriceQuote {
                    product_id: product.id,
                    category: product.category(),
                    base_price: product.base_price,
                    floor_price: round_cents(product.base_price * (1.0 - product.max_profit_margin)),
                    discounted_price: round_cents(product.base_price),
                    discount_percent: 0,
                    computed_at: now,
                    trace: QuoteTrace::default(),
                }
            }
        }
    }

    /// Discount grows as remaining shelf life shrinks, floored by margin
    fn perishable_price(
        &self,
        product: &Product,
        attrs: &PerishableAttributes,
        now: DateTime<Utc>,
    ) -> Result<(f64, f64, QuoteTrace), PricingError> {
        let manufactured = attrs.manufacturing_date.and_time(NaiveTime::MIN).and_utc();
        if now < manufactured {
            return Err(PricingError::ClockSkew {
                now,
                start: manufactured,
            });
        }

        let expiry = attrs.expiry_date.and_time(NaiveTime::MIN).and_utc();
        let shelf_life_seconds = attrs.max_shelf_life_days as f64 * SECONDS_PER_DAY;
        let remaining_seconds = (expiry - now).num_seconds() as f64;
        let remaining_life_fraction = (remaining_seconds / shelf_life_seconds).clamp(0.0, 1.0);

        let price =
            product.base_price
                * (1.0 - product.current_profit_margin * (1.0 - remaining_life_fraction));

        let trace = QuoteTrace {
            remaining_life_fraction: Some(remaining_life_fraction),
            demand_trend_score: Some(1.0 - attrs.current_demand_level),
            stock_clearance_score: Some(stock_clearance_score(product, attrs, now)),
            ..QuoteTrace::default()
        };

        Ok((price, product.base_price, trace))
    }

    /// Scarcity pricing: price rises with urgency and occupancy, with a late
    /// liquidation discount for poorly sold events
    fn event_price(
        &self,
        product: &Product,
        attrs: &EventAttributes,
        now: DateTime<Utc>,
    ) -> Result<(f64, f64, QuoteTrace), PricingError> {
        if now < product.listed_at {
            return Err(PricingError::ClockSkew {
                now,
                start: product.listed_at,
            });
        }

        // Lead time is fixed at listing; validation guarantees it is positive
        let total_lead_seconds = (attrs.event_date - product.listed_at).num_seconds() as f64;
        let remaining_seconds = (attrs.event_date - now).num_seconds() as f64;
        let urgency_fraction = (1.0 - remaining_seconds / total_lead_seconds).clamp(0.0, 1.0);
        let occupancy_fraction = attrs.occupancy_fraction();

        let w = self.config.occupancy_weight;
        let scarcity = urgency_fraction * ((1.0 - w) + w * occupancy_fraction);
        let span = attrs.max_ticket_price - attrs.min_ticket_price;
        let mut price = attrs.min_ticket_price + span * scarcity;

        if occupancy_fraction < self.config.liquidation_occupancy_threshold
            && urgency_fraction > self.config.liquidation_urgency_threshold
        {
            price *= self.config.liquidation_multiplier;
        }

        price = price.clamp(attrs.min_ticket_price, attrs.max_ticket_price);

        let trace = QuoteTrace {
            urgency_fraction: Some(urgency_fraction),
            occupancy_fraction: Some(occupancy_fraction),
            ..QuoteTrace::default()
        };

        let upper = product.base_price.max(attrs.max_ticket_price);
        Ok((price, upper, trace))
    }

    /// Loyalty discount: renewal behavior drives the discount, not time
    fn subscription_price(
        &self,
        product: &Product,
        attrs: &SubscriptionAttributes,
        now: DateTime<Utc>,
    ) -> Result<(f64, f64, QuoteTrace), PricingError> {
        if now < product.listed_at {
            return Err(PricingError::ClockSkew {
                now,
                start: product.listed_at,
            });
        }

        let price =
            product.base_price * (1.0 - product.current_profit_margin * attrs.renewal_rate);

        let trace = QuoteTrace {
            renewal_rate: Some(attrs.renewal_rate),
            ..QuoteTrace::default()
        };

        Ok((price, product.base_price, trace))
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

/// Stock clearance factor from the audit log model: projected days of stock
/// against days left to expiry, normalized by 5. Zero at or past expiry.
fn stock_clearance_score(
    product: &Product,
    attrs: &PerishableAttributes,
    now: DateTime<Utc>,
) -> f64 {
    let expiry = attrs.expiry_date.and_time(NaiveTime::MIN).and_utc();
    let days_to_expiry = (expiry - now).num_days();
    if days_to_expiry <= 0 || attrs.current_daily_selling_rate <= 0.0 {
        return 0.0;
    }
    let scf =
        product.current_stock as f64 / (days_to_expiry as f64 * attrs.current_daily_selling_rate);
    scf / 5.0
}
