//! Budget comparison report
//!
//! Actual spending against each budget ceiling for one month. The report is
//! budget-driven: every budget for the month gets a row, categories without
//! a budget do not appear, and rows keep the budgets' input order.

use serde::Serialize;
use std::fmt;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::export::csv::escape_csv;
use crate::models::{Budget, Money, MonthKey, Transaction};

/// Budget-compliance classification
///
/// Thresholds are fixed business rules: spending over 100% of the ceiling
/// is over budget, under 80% is comfortably under, and 80-100% inclusive
/// counts as on track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    Under,
    OnTrack,
    Over,
}

impl BudgetStatus {
    /// Classify a utilization percentage; first match wins
    pub fn classify(percentage: f64) -> Self {
        if percentage > 100.0 {
            Self::Over
        } else if percentage < 80.0 {
            Self::Under
        } else {
            Self::OnTrack
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Under => write!(f, "under"),
            Self::OnTrack => write!(f, "on-track"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// One budget's ceiling against what was actually spent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub category: String,
    /// The ceiling for the month
    pub budget: Money,
    /// Spending in the category for the month
    pub actual: Money,
    /// Utilization, 0-100+; zero when the ceiling is zero
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// Budget-vs-actual rows for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparisonReport {
    pub month: MonthKey,
    pub comparisons: Vec<BudgetComparison>,
}

impl BudgetComparisonReport {
    /// Generate the comparison for a month
    ///
    /// `actual` sums expense magnitudes whose category equals the budget's
    /// category and whose date falls in the month. A budget with no spend
    /// still appears with `actual = 0`. No budgets for the month means an
    /// empty report.
    pub fn generate(transactions: &[Transaction], budgets: &[Budget], month: MonthKey) -> Self {
        let comparisons = budgets
            .iter()
            .filter(|b| b.month == month)
            .map(|budget| {
                let actual: Money = transactions
                    .iter()
                    .filter(|t| {
                        t.is_expense()
                            && t.month() == month
                            && t.category.as_deref() == Some(budget.category.as_str())
                    })
                    .map(|t| t.amount)
                    .sum();

                let percentage = if budget.amount.is_positive() {
                    actual.cents() as f64 / budget.amount.cents() as f64 * 100.0
                } else {
                    0.0
                };

                BudgetComparison {
                    category: budget.category.clone(),
                    budget: budget.amount,
                    actual,
                    percentage,
                    status: BudgetStatus::classify(percentage),
                }
            })
            .collect();

        Self { month, comparisons }
    }

    /// Sum of the month's ceilings
    pub fn total_budgeted(&self) -> Money {
        self.comparisons.iter().map(|c| c.budget).sum()
    }

    /// Sum of the month's actual spending against those ceilings
    pub fn total_actual(&self) -> Money {
        self.comparisons.iter().map(|c| c.actual).sum()
    }

    /// How many categories are over budget
    pub fn over_budget_count(&self) -> usize {
        self.comparisons
            .iter()
            .filter(|c| c.status == BudgetStatus::Over)
            .count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget vs Actual - {}\n", self.month.label()));
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>8} {:>10}\n",
            "Category", "Budget", "Actual", "%", "Status"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for row in &self.comparisons {
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>7.1}% {:>10}\n",
                row.category,
                row.budget.to_string(),
                row.actual.to_string(),
                row.percentage,
                row.status.to_string()
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12}\n",
            "TOTAL",
            self.total_budgeted().to_string(),
            self.total_actual().to_string()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Category,Budget,Actual,Percentage,Status")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for row in &self.comparisons {
            writeln!(
                writer,
                "{},{},{},{:.2},{}",
                escape_csv(&row.category),
                row.budget.to_decimal_string(),
                row.actual.to_decimal_string(),
                row.percentage,
                row.status
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
