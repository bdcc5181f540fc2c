//! CSV export functionality
//!
//! Writes transactions in the dashboard's five-column statement format
//! (`Date,Description,Category,Type,Amount`). The description field is
//! always quoted because free text routinely carries commas; other fields
//! are quoted only when they need it. `import::csv` reads this format back.

use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::Transaction;

/// Placeholder written in the category column when a record has none
pub const MISSING_CATEGORY: &str = "N/A";

/// Export transactions to CSV
///
/// Rows come out in input order. Dates are ISO (`YYYY-MM-DD`), the type
/// column is lowercase, and the amount is signed: negative for expenses,
/// positive for income.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> FintrackResult<()> {
    writeln!(writer, "Date,Description,Category,Type,Amount")
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    for txn in transactions {
        writeln!(
            writer,
            "{},{},{},{},{}",
            txn.date.format("%Y-%m-%d"),
            quote_csv(&txn.description),
            escape_csv(txn.category.as_deref().unwrap_or(MISSING_CATEGORY)),
            txn.kind,
            txn.signed_amount().to_decimal_string()
        )
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Quote a field unconditionally, doubling embedded quotes
fn quote_csv(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Escape a string for CSV format
///
/// Shared with the report exporters, which also emit category columns.
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        quote_csv(s)
    } else {
        s.to_string()
    }
}
