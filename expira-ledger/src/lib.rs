pub mod calc_log;
pub mod history;

pub use calc_log::{CalculationEntry, CalculationLog};
pub use history::{DiscountHistory, DiscountRecord};
