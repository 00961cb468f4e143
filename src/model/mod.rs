//! Types that represent the core data model, such as `ExpenseRecord` and `Category`.
mod amount;
mod category;
mod record;

pub use amount::{Amount, AmountError};
pub use category::{Category, ALL_CATEGORIES};
pub use record::{ExpenseRecord, HEADERS};
