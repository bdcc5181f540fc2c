//! Month overview
//!
//! The balance summary behind the dashboard's header cards: what the books
//! stood at going into a month, the month's movements, and where they stand
//! coming out.

use serde::Serialize;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, MonthKey, Transaction};

/// Opening and closing balances around one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOverview {
    pub month: MonthKey,
    /// Signed sum of everything dated before the month
    pub opening_balance: Money,
    /// Income during the month
    pub income: Money,
    /// Spending during the month (reported positive)
    pub expenses: Money,
    /// Opening balance plus the month's net movement
    pub closing_balance: Money,
}

impl MonthOverview {
    /// Generate the overview for a month
    ///
    /// The opening balance folds the signed amounts of every transaction
    /// dated strictly before the month; records after the month only exist
    /// for later overviews and do not affect this one.
    pub fn generate(transactions: &[Transaction], month: MonthKey) -> Self {
        let mut opening_balance = Money::zero();
        let mut income = Money::zero();
        let mut expenses = Money::zero();

        for txn in transactions {
            let txn_month = txn.month();
            if txn_month < month {
                opening_balance += txn.signed_amount();
            } else if txn_month == month {
                if txn.is_income() {
                    income += txn.amount;
                } else {
                    expenses += txn.amount;
                }
            }
        }

        Self {
            month,
            opening_balance,
            income,
            expenses,
            closing_balance: opening_balance + income - expenses,
        }
    }

    /// Net movement for the month
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Overview - {}\n", self.month.label()));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>18}\n", "Opening Balance", self.opening_balance.to_string()));
        output.push_str(&format!("{:<20} {:>18}\n", "Income", self.income.to_string()));
        output.push_str(&format!("{:<20} {:>18}\n", "Expenses", self.expenses.to_string()));
        output.push_str(&format!("{:<20} {:>18}\n", "Net", self.net().to_string()));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>18}\n", "Closing Balance", self.closing_balance.to_string()));

        output
    }

    /// Export the overview to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Month,Opening Balance,Income,Expenses,Closing Balance")
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        writeln!(
            writer,
            "{},{},{},{},{}",
            self.month,
            self.opening_balance.to_decimal_string(),
            self.income.to_decimal_string(),
            self.expenses.to_decimal_string(),
            self.closing_balance.to_decimal_string()
        )
        .map_err(|e| FintrackError::Export(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn history() -> Vec<Transaction> {
        vec![
            Transaction::income("June salary", Money::from_cents(320_000), date(2024, 6, 1)),
            Transaction::expense("Electricity", Money::from_cents(8500), date(2024, 6, 28), "Bills"),
            Transaction::income("Salary", Money::from_cents(350_000), date(2024, 7, 1)),
            Transaction::expense("Grocery shopping", Money::from_cents(12050), date(2024, 7, 1), "Food"),
            Transaction::expense("August rent", Money::from_cents(120_000), date(2024, 8, 1), "Bills"),
        ]
    }

    #[test]
    fn test_overview_balances() {
        let overview = MonthOverview::generate(&history(), MonthKey::new(2024, 7).unwrap());

        assert_eq!(overview.opening_balance, Money::from_cents(320_000 - 8500));
        assert_eq!(overview.income, Money::from_cents(350_000));
        assert_eq!(overview.expenses, Money::from_cents(12050));
        assert_eq!(overview.net(), Money::from_cents(350_000 - 12050));
        assert_eq!(
            overview.closing_balance,
            Money::from_cents(320_000 - 8500 + 350_000 - 12050)
        );
    }

    #[test]
    fn test_later_months_do_not_affect_overview() {
        let with_future = MonthOverview::generate(&history(), MonthKey::new(2024, 7).unwrap());

        let mut without_future = history();
        without_future.pop();
        let trimmed = MonthOverview::generate(&without_future, MonthKey::new(2024, 7).unwrap());

        assert_eq!(with_future, trimmed);
    }

    #[test]
    fn test_first_month_opens_at_zero() {
        let overview = MonthOverview::generate(&history(), MonthKey::new(2024, 6).unwrap());
        assert_eq!(overview.opening_balance, Money::zero());
        assert_eq!(overview.closing_balance, Money::from_cents(320_000 - 8500));
    }

    #[test]
    fn test_empty_input() {
        let overview = MonthOverview::generate(&[], MonthKey::new(2024, 7).unwrap());
        assert_eq!(overview.opening_balance, Money::zero());
        assert_eq!(overview.income, Money::zero());
        assert_eq!(overview.expenses, Money::zero());
        assert_eq!(overview.closing_balance, Money::zero());
    }

    #[test]
    fn test_export_csv() {
        let overview = MonthOverview::generate(&history(), MonthKey::new(2024, 7).unwrap());
        let mut out = Vec::new();
        overview.export_csv(&mut out).unwrap();

        let csv = String::from_utf8(out).unwrap();
        assert_eq!(
            csv,
            "Month,Opening Balance,Income,Expenses,Closing Balance\n\
             2024-07,3115.00,3500.00,120.50,6494.50\n"
        );
    }
}
