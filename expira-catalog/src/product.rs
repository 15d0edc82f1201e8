use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product categories in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Perishable,
    Event,
    Subscription,
}

/// Core product structure shared by every category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub current_stock: i32,
    pub min_stock_threshold: Option<i32>,
    pub max_profit_margin: f64,
    pub current_profit_margin: f64,
    pub listed_at: DateTime<Utc>,
    pub attributes: CategoryAttributes,
    pub metadata: serde_json::Value,
}

/// Category-specific attribute records, owned exclusively by their product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CategoryAttributes {
    Perishable(PerishableAttributes),
    Event(EventAttributes),
    Subscription(SubscriptionAttributes),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerishableAttributes {
    pub manufacturing_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub max_shelf_life_days: i64,
    pub current_daily_selling_rate: f64,
    pub max_expected_selling_rate: f64,
    pub quality_score: f64,
    pub current_demand_level: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttributes {
    pub event_date: DateTime<Utc>,
    pub venue: Option<String>,
    pub total_capacity: i32,
    pub seats_booked: i32,
    pub min_ticket_price: f64,
    pub max_ticket_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionAttributes {
    pub standard_duration_days: i64,
    pub grace_period_days: i64,
    pub total_subscribers: i32,
    pub active_subscribers: i32,
    pub renewal_rate: f64,
    pub average_subscription_length_days: i64,
}

/// Attribute validation errors
#[derive(Debug, thiserror::Error)]
pub enum AttributeError {
    #[error("base price must be positive and finite: {0}")]
    InvalidBasePrice(f64),

    #[error("profit margins out of range: current {current}, max {max}")]
    InvalidMargins { current: f64, max: f64 },

    #[error("stock cannot be negative: {0}")]
    NegativeStock(i32),

    #[error("expiry date {expiry} precedes manufacturing date {manufacturing}")]
    ExpiryBeforeManufacturing {
        manufacturing: NaiveDate,
        expiry: NaiveDate,
    },

    #[error("max shelf life must be positive: {0}")]
    InvalidShelfLife(i64),

    #[error("batch life {actual} days exceeds declared max shelf life {max}")]
    ShelfLifeExceeded { actual: i64, max: i64 },

    #[error("selling rate cannot be negative: {0}")]
    NegativeSellingRate(f64),

    #[error("{field} must be within [0, 1]: {value}")]
    ScoreOutOfRange { field: &'static str, value: f64 },

    #[error("event capacity must be positive: {0}")]
    InvalidCapacity(i32),

    #[error("seats booked out of range: {booked} of {capacity}")]
    SeatsOutOfRange { booked: i32, capacity: i32 },

    #[error("ticket price band invalid: min {min}, max {max}")]
    InvalidTicketBand { min: f64, max: f64 },

    #[error("event date {event} is not after listing date {listed}")]
    EventBeforeListing {
        event: DateTime<Utc>,
        listed: DateTime<Utc>,
    },

    #[error("subscription duration must be positive: {0}")]
    InvalidDuration(i64),

    #[error("grace period cannot be negative: {0}")]
    NegativeGracePeriod(i64),

    #[error("subscriber counts out of range: {active} active of {total} total")]
    SubscribersOutOfRange { active: i32, total: i32 },

    #[error("average subscription length cannot be negative: {0}")]
    NegativeSubscriptionLength(i64),
}

impl Product {
    /// Category derived from the active attribute variant
    pub fn category(&self) -> ProductCategory {
        match self.attributes {
            CategoryAttributes::Perishable(_) => ProductCategory::Perishable,
            CategoryAttributes::Event(_) => ProductCategory::Event,
            CategoryAttributes::Subscription(_) => ProductCategory::Subscription,
        }
    }

    /// Check every declared field invariant
    pub fn validate(&self) -> Result<(), AttributeError> {
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(AttributeError::InvalidBasePrice(self.base_price));
        }

        let current = self.current_profit_margin;
        let max = self.max_profit_margin;
        if !(0.0..=1.0).contains(&max) || !(0.0..=1.0).contains(&current) || current > max {
            return Err(AttributeError::InvalidMargins { current, max });
        }

        if self.current_stock < 0 {
            return Err(AttributeError::NegativeStock(self.current_stock));
        }

        match &self.attributes {
            CategoryAttributes::Perishable(attrs) => attrs.validate(),
            CategoryAttributes::Event(attrs) => attrs.validate(self.listed_at),
            CategoryAttributes::Subscription(attrs) => attrs.validate(),
        }
    }
}

impl PerishableAttributes {
    /// Days between manufacturing and expiry for this batch
    pub fn shelf_life_days(&self) -> i64 {
        (self.expiry_date - self.manufacturing_date).num_days()
    }

    fn validate(&self) -> Result<(), AttributeError> {
        if self.expiry_date < self.manufacturing_date {
            return Err(AttributeError::ExpiryBeforeManufacturing {
                manufacturing: self.manufacturing_date,
                expiry: self.expiry_date,
            });
        }
        if self.max_shelf_life_days <= 0 {
            return Err(AttributeError::InvalidShelfLife(self.max_shelf_life_days));
        }
        if self.shelf_life_days() > self.max_shelf_life_days {
            return Err(AttributeError::ShelfLifeExceeded {
                actual: self.shelf_life_days(),
                max: self.max_shelf_life_days,
            });
        }
        if self.current_daily_selling_rate < 0.0 {
            return Err(AttributeError::NegativeSellingRate(
                self.current_daily_selling_rate,
            ));
        }
        if self.max_expected_selling_rate < 0.0 {
            return Err(AttributeError::NegativeSellingRate(
                self.max_expected_selling_rate,
            ));
        }
        if !(0.0..=1.0).contains(&self.quality_score) {
            return Err(AttributeError::ScoreOutOfRange {
                field: "quality_score",
                value: self.quality_score,
            });
        }
        if !(0.0..=1.0).contains(&self.current_demand_level) {
            return Err(AttributeError::ScoreOutOfRange {
                field: "current_demand_level",
                value: self.current_demand_level,
            });
        }
        Ok(())
    }
}

impl EventAttributes {
    /// Seats still open for sale, derived rather than stored
    pub fn available_seats(&self) -> i32 {
        self.total_capacity - self.seats_booked
    }

    /// Booked seats over total capacity
    pub fn occupancy_fraction(&self) -> f64 {
        self.seats_booked as f64 / self.total_capacity as f64
    }

    fn validate(&self, listed_at: DateTime<Utc>) -> Result<(), AttributeError> {
        if self.total_capacity <= 0 {
            return Err(AttributeError::InvalidCapacity(self.total_capacity));
        }
        if self.seats_booked < 0 || self.seats_booked > self.total_capacity {
            return Err(AttributeError::SeatsOutOfRange {
                booked: self.seats_booked,
                capacity: self.total_capacity,
            });
        }
        if self.min_ticket_price <= 0.0
            || !self.min_ticket_price.is_finite()
            || !self.max_ticket_price.is_finite()
            || self.min_ticket_price > self.max_ticket_price
        {
            return Err(AttributeError::InvalidTicketBand {
                min: self.min_ticket_price,
                max: self.max_ticket_price,
            });
        }
        if self.event_date <= listed_at {
            return Err(AttributeError::EventBeforeListing {
                event: self.event_date,
                listed: listed_at,
            });
        }
        Ok(())
    }
}

impl SubscriptionAttributes {
    fn validate(&self) -> Result<(), AttributeError> {
        if self.standard_duration_days <= 0 {
            return Err(AttributeError::InvalidDuration(self.standard_duration_days));
        }
        if self.grace_period_days < 0 {
            return Err(AttributeError::NegativeGracePeriod(self.grace_period_days));
        }
        if self.active_subscribers < 0 || self.active_subscribers > self.total_subscribers {
            return Err(AttributeError::SubscribersOutOfRange {
                active: self.active_subscribers,
                total: self.total_subscribers,
            });
        }
        if !(0.0..=1.0).contains(&self.renewal_rate) {
            return Err(AttributeError::ScoreOutOfRange {
                field: "renewal_rate",
                value: self.renewal_rate,
            });
        }
        if self.average_subscription_length_days < 0 {
            return Err(AttributeError::NegativeSubscriptionLength(
                self.average_subscription_length_days,
            ));
        }
        Ok(())
    }
}
