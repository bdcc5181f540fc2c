//! Core data models for fintrack-core
//!
//! The data structures the aggregation engine runs on: money amounts,
//! month keys, transaction and budget records, category metadata. Records
//! are immutable values; derived report rows live under `reports`.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod transaction;

pub use budget::Budget;
pub use category::{category_color, is_known_category, CATEGORIES};
pub use ids::{BudgetId, TransactionId};
pub use money::Money;
pub use month::MonthKey;
pub use transaction::{Transaction, TransactionKind};
