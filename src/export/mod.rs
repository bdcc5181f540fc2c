//! Export module for fintrack-core
//!
//! Writes snapshot data back out for the dashboard's download action. CSV is
//! the only bespoke wire format; JSON export is plain serde on the models.

pub mod csv;

pub use self::csv::{export_transactions_csv, MISSING_CATEGORY};
