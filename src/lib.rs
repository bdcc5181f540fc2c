//! fintrack-core - Aggregation engine for a personal finance dashboard
//!
//! This library is the computational core behind a personal-finance
//! dashboard: pure, stateless functions that turn an in-memory snapshot of
//! transaction and budget records into the derived views the UI renders.
//! It holds no state and performs no I/O beyond the reader/writer arguments
//! its import and export edges are handed.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, transactions, budgets)
//! - `import`: Normalization of raw API and CSV records into a snapshot
//! - `reports`: Derived views (monthly totals, category breakdowns, budget
//!   tracking, month overview)
//! - `export`: CSV statement writer
//! - `format`: Locale-aware display helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack_core::import::snapshot_from_json;
//! use fintrack_core::reports::MonthlyReport;
//!
//! let import = snapshot_from_json(&transactions_json, &budgets_json)?;
//! let report = MonthlyReport::generate(&import.snapshot.transactions);
//! ```

pub mod error;
pub mod export;
pub mod format;
pub mod import;
pub mod models;
pub mod reports;

pub use error::{FintrackError, FintrackResult};
