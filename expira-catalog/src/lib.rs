pub mod availability;
pub mod product;

pub use availability::{sellability, stock_status, Sellability, StockStatus};
pub use product::{
    AttributeError, CategoryAttributes, EventAttributes, PerishableAttributes, Product,
    ProductCategory, SubscriptionAttributes,
};
