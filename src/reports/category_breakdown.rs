//! Category breakdown report
//!
//! Spending by category with each category's share of the total, the
//! backing data for the dashboard's pie chart and "top category" card.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::export::csv::escape_csv;
use crate::models::{category_color, Money, MonthKey, Transaction};

/// One category's share of spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub category: String,
    /// Sum of expense magnitudes in this category
    pub amount: Money,
    /// Share of the breakdown's total, 0-100
    pub percentage: f64,
    /// Chart color for this category
    pub color: &'static str,
}

/// Spending by category, largest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdownReport {
    /// The month filter the report was generated with, if any
    pub month: Option<MonthKey>,
    pub categories: Vec<CategoryAggregate>,
}

impl CategoryBreakdownReport {
    /// Generate the breakdown
    ///
    /// Only expense transactions with a non-blank category count; names are
    /// trimmed, and with a month filter only that month's records qualify.
    /// Rows sort by amount descending with category name ascending as the
    /// tie-break, so the order is a function of the input multiset alone.
    /// When nothing qualifies the report is empty, never a division by zero.
    pub fn generate(transactions: &[Transaction], month: Option<MonthKey>) -> Self {
        let mut totals: BTreeMap<&str, Money> = BTreeMap::new();

        for txn in transactions {
            if !txn.is_expense() {
                continue;
            }
            // A whitespace-only category is uncategorized.
            let category = match txn.category.as_deref().map(str::trim) {
                Some(c) if !c.is_empty() => c,
                _ => continue,
            };
            if let Some(filter) = month {
                if txn.month() != filter {
                    continue;
                }
            }
            *totals.entry(category).or_insert(Money::zero()) += txn.amount;
        }

        let total: Money = totals.values().copied().sum();
        if total.is_zero() {
            return Self {
                month,
                categories: Vec::new(),
            };
        }

        let mut categories: Vec<CategoryAggregate> = totals
            .into_iter()
            .map(|(name, amount)| CategoryAggregate {
                category: name.to_string(),
                amount,
                percentage: amount.cents() as f64 / total.cents() as f64 * 100.0,
                color: category_color(name),
            })
            .collect();

        categories.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        Self { month, categories }
    }

    /// Total spending across the breakdown
    pub fn total_expenses(&self) -> Money {
        self.categories.iter().map(|c| c.amount).sum()
    }

    /// The largest spending category, if any
    pub fn top_category(&self) -> Option<&CategoryAggregate> {
        self.categories.first()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        match self.month {
            Some(month) => output.push_str(&format!("Category Breakdown - {}\n", month.label())),
            None => output.push_str("Category Breakdown - All Months\n"),
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14} {:>8}\n",
            "Category", "Amount", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>14} {:>7.1}%\n",
                row.category,
                row.amount.to_string(),
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "TOTAL",
            self.total_expenses().to_string()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Category,Amount,Percentage")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for row in &self.categories {
            writeln!(
                writer,
                "{},{},{:.2}",
                escape_csv(&row.category),
                row.amount.to_decimal_string(),
                row.percentage
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
