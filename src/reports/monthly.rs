//! Monthly totals report
//!
//! Month-by-month income and spending totals, the backing data for the
//! dashboard's overview chart.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, MonthKey, Transaction};

/// Income and spending totals for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAggregate {
    pub month: MonthKey,
    /// Sum of income magnitudes
    pub income: Money,
    /// Sum of expense magnitudes (reported positive)
    pub expenses: Money,
}

impl MonthlyAggregate {
    /// Net movement for the month
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Month-by-month totals over a transaction history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyAggregate>,
}

impl MonthlyReport {
    /// Generate monthly totals
    ///
    /// Rows ascend chronologically regardless of input order; only months
    /// with at least one transaction appear. Empty input yields an empty
    /// report.
    pub fn generate(transactions: &[Transaction]) -> Self {
        let mut totals: BTreeMap<MonthKey, (Money, Money)> = BTreeMap::new();

        for txn in transactions {
            let entry = totals
                .entry(txn.month())
                .or_insert((Money::zero(), Money::zero()));
            if txn.is_income() {
                entry.0 += txn.amount;
            } else {
                entry.1 += txn.amount;
            }
        }

        let months = totals
            .into_iter()
            .map(|(month, (income, expenses))| MonthlyAggregate {
                month,
                income,
                expenses,
            })
            .collect();

        Self { months }
    }

    /// Total income across all months
    pub fn total_income(&self) -> Money {
        self.months.iter().map(|m| m.income).sum()
    }

    /// Total spending across all months
    pub fn total_expenses(&self) -> Money {
        self.months.iter().map(|m| m.expenses).sum()
    }

    /// Look up a single month's row
    pub fn month(&self, month: MonthKey) -> Option<&MonthlyAggregate> {
        self.months.iter().find(|m| m.month == month)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly Totals\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.months {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                row.month.label(),
                row.income.to_string(),
                row.expenses.to_string(),
                row.net().to_string()
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.total_income().to_string(),
            self.total_expenses().to_string(),
            (self.total_income() - self.total_expenses()).to_string()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Month,Income,Expenses,Net")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for row in &self.months {
            writeln!(
                writer,
                "{},{},{},{}",
                row.month,
                row.income.to_decimal_string(),
                row.expenses.to_decimal_string(),
                row.net().to_decimal_string()
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
