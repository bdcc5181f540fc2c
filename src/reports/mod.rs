//! Reports module for fintrack-core
//!
//! Provides the dashboard's aggregate views: monthly income/expense totals,
//! category breakdowns, budget-versus-actual comparisons, and the month
//! overview balances.

pub mod budget_comparison;
pub mod category_breakdown;
pub mod monthly;
pub mod overview;

pub use budget_comparison::{BudgetComparison, BudgetComparisonReport, BudgetStatus};
pub use category_breakdown::{CategoryAggregate, CategoryBreakdownReport};
pub use monthly::{MonthlyAggregate, MonthlyReport};
pub use overview::MonthOverview;
