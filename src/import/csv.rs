//! Statement CSV import
//!
//! Reads the dashboard's own five-column CSV format
//! (`Date,Description,Category,Type,Amount`) back into transactions, so an
//! exported statement can be re-imported. Malformed rows are skipped with
//! row-indexed warnings, same as JSON ingestion; a stream without the
//! expected header row is a batch-level error.

use std::io::Read;

use chrono::NaiveDate;
use csv::StringRecord;

use super::{skip, ImportWarning, RecordType, SkipReason};
use crate::error::{FintrackError, FintrackResult};
use crate::export::csv::MISSING_CATEGORY;
use crate::models::{Money, Transaction, TransactionId, TransactionKind};

/// Result of reading a transaction CSV
#[derive(Debug, Clone)]
pub struct CsvImport {
    pub transactions: Vec<Transaction>,
    /// Skipped rows; `index` is the data row number, 0-indexed after the header
    pub warnings: Vec<ImportWarning>,
}

struct Columns {
    date: usize,
    description: Option<usize>,
    category: Option<usize>,
    kind: usize,
    amount: usize,
}

impl Columns {
    fn detect(headers: &StringRecord) -> Result<Self, FintrackError> {
        let mut date = None;
        let mut description = None;
        let mut category = None;
        let mut kind = None;
        let mut amount = None;

        for (idx, header) in headers.iter().enumerate() {
            match header.trim().to_ascii_lowercase().as_str() {
                "date" => date = Some(idx),
                "description" => description = Some(idx),
                "category" => category = Some(idx),
                "type" => kind = Some(idx),
                "amount" => amount = Some(idx),
                _ => {}
            }
        }

        let missing = |name: &str| FintrackError::Csv(format!("missing '{}' column", name));
        Ok(Self {
            date: date.ok_or_else(|| missing("Date"))?,
            description,
            category,
            kind: kind.ok_or_else(|| missing("Type"))?,
            amount: amount.ok_or_else(|| missing("Amount"))?,
        })
    }
}

/// Read transactions from a CSV stream in the export format
///
/// Row ids are not part of the format, so every imported transaction gets a
/// fresh id. The `Type` column decides direction; the amount's sign is
/// normalized away.
pub fn read_transactions_csv<R: Read>(reader: R) -> FintrackResult<CsvImport> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns = Columns::detect(&csv_reader.headers()?.clone())?;

    let mut transactions = Vec::new();
    let mut warnings = Vec::new();

    for (index, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warnings.push(skip(
                    RecordType::Transaction,
                    index,
                    None,
                    SkipReason::Malformed(e.to_string()),
                ));
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Ok(txn) => transactions.push(txn),
            Err(reason) => warnings.push(skip(RecordType::Transaction, index, None, reason)),
        }
    }

    Ok(CsvImport {
        transactions,
        warnings,
    })
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<Transaction, SkipReason> {
    let date_str = record
        .get(columns.date)
        .ok_or(SkipReason::MissingField("date"))?
        .trim();
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| SkipReason::InvalidDate(date_str.to_string()))?;

    let kind_str = record
        .get(columns.kind)
        .ok_or(SkipReason::MissingField("type"))?;
    let kind =
        TransactionKind::parse(kind_str).ok_or(SkipReason::UnknownKind(kind_str.to_string()))?;

    let amount_str = record
        .get(columns.amount)
        .ok_or(SkipReason::MissingField("amount"))?
        .trim();
    let amount = Money::parse(amount_str)
        .map_err(|_| SkipReason::InvalidAmount(amount_str.to_string()))?
        .abs();

    let description = columns
        .description
        .and_then(|idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let category = columns
        .category
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != MISSING_CATEGORY)
        .map(String::from);

    Ok(Transaction {
        id: TransactionId::new(),
        kind,
        amount,
        description,
        date,
        category,
    })
}
