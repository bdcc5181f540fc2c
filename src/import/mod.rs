//! Snapshot ingestion
//!
//! Turns raw records from the upstream API into a normalized [`Snapshot`].
//! Malformed records never abort a batch: each one is skipped with an
//! [`ImportWarning`] so one bad row cannot blank the whole dashboard. The
//! only batch-level failure is a payload that does not decode as a JSON
//! array at all.
//!
//! Normalization applies the engine's canonical conventions: amounts become
//! non-negative magnitudes with the direction in `kind`, month strings go
//! through [`MonthKey::parse`], blank categories become `None`, and records
//! without an id get one minted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::FintrackResult;
use crate::models::{Budget, BudgetId, Money, MonthKey, Transaction, TransactionId, TransactionKind};

pub mod csv;

pub use self::csv::{read_transactions_csv, CsvImport};

/// Transaction record as the upstream API sends it
///
/// Every field is optional so a partially broken record still decodes and
/// gets a precise warning instead of poisoning its whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
}

/// Budget record as the upstream API sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBudget {
    pub id: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub month: Option<String>,
}

/// Normalized input every report runs on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        Self {
            transactions,
            budgets,
        }
    }
}

/// A normalized snapshot plus the records that did not make it in
#[derive(Debug, Clone)]
pub struct SnapshotImport {
    pub snapshot: Snapshot,
    pub warnings: Vec<ImportWarning>,
}

/// Which input array a warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Transaction,
    Budget,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transaction => write!(f, "transaction"),
            Self::Budget => write!(f, "budget"),
        }
    }
}

/// Why a record was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The record did not decode structurally (wrong field type, not an object)
    Malformed(String),
    MissingField(&'static str),
    InvalidDate(String),
    InvalidAmount(String),
    UnknownKind(String),
    InvalidMonth(String),
    NegativeBudget(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(detail) => write!(f, "malformed record: {}", detail),
            Self::MissingField(field) => write!(f, "missing field '{}'", field),
            Self::InvalidDate(value) => write!(f, "invalid date '{}'", value),
            Self::InvalidAmount(value) => write!(f, "invalid amount '{}'", value),
            Self::UnknownKind(value) => write!(f, "unknown transaction type '{}'", value),
            Self::InvalidMonth(value) => write!(f, "invalid month '{}'", value),
            Self::NegativeBudget(value) => write!(f, "negative budget ceiling '{}'", value),
        }
    }
}

/// One skipped record: where it sat in its input array and why it was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    pub record: RecordType,
    pub index: usize,
    pub id: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(
                f,
                "{} {} (id {}): {}",
                self.record, self.index, id, self.reason
            ),
            None => write!(f, "{} {}: {}", self.record, self.index, self.reason),
        }
    }
}

pub(crate) fn skip(
    record: RecordType,
    index: usize,
    id: Option<String>,
    reason: SkipReason,
) -> ImportWarning {
    let warning = ImportWarning {
        record,
        index,
        id,
        reason,
    };
    warn!(
        record = %warning.record,
        index = warning.index,
        id = warning.id.as_deref().unwrap_or("-"),
        reason = %warning.reason,
        "skipping record"
    );
    warning
}

/// Normalize pre-decoded raw records into a snapshot
///
/// Never fails; anything that cannot be normalized lands in `warnings`.
pub fn import_snapshot(
    transactions: Vec<RawTransaction>,
    budgets: Vec<RawBudget>,
) -> SnapshotImport {
    let mut snapshot = Snapshot::default();
    let mut warnings = Vec::new();

    for (index, raw) in transactions.into_iter().enumerate() {
        let id = raw.id.clone();
        match normalize_transaction(raw) {
            Ok(txn) => snapshot.transactions.push(txn),
            Err(reason) => warnings.push(skip(RecordType::Transaction, index, id, reason)),
        }
    }

    for (index, raw) in budgets.into_iter().enumerate() {
        let id = raw.id.clone();
        match normalize_budget(raw) {
            Ok(budget) => snapshot.budgets.push(budget),
            Err(reason) => warnings.push(skip(RecordType::Budget, index, id, reason)),
        }
    }

    SnapshotImport { snapshot, warnings }
}

/// Decode and normalize the two JSON array payloads the data layer hands over
///
/// Fails only when a payload is not a JSON array; individual records that do
/// not decode are skipped like any other malformed record.
pub fn snapshot_from_json(
    transactions_json: &str,
    budgets_json: &str,
) -> FintrackResult<SnapshotImport> {
    let transaction_values: Vec<serde_json::Value> = serde_json::from_str(transactions_json)?;
    let budget_values: Vec<serde_json::Value> = serde_json::from_str(budgets_json)?;

    let mut snapshot = Snapshot::default();
    let mut warnings = Vec::new();

    for (index, value) in transaction_values.into_iter().enumerate() {
        let id = field_as_string(&value, "id");
        let outcome = serde_json::from_value::<RawTransaction>(value)
            .map_err(|e| SkipReason::Malformed(e.to_string()))
            .and_then(normalize_transaction);
        match outcome {
            Ok(txn) => snapshot.transactions.push(txn),
            Err(reason) => warnings.push(skip(RecordType::Transaction, index, id, reason)),
        }
    }

    for (index, value) in budget_values.into_iter().enumerate() {
        let id = field_as_string(&value, "id");
        let outcome = serde_json::from_value::<RawBudget>(value)
            .map_err(|e| SkipReason::Malformed(e.to_string()))
            .and_then(normalize_budget);
        match outcome {
            Ok(budget) => snapshot.budgets.push(budget),
            Err(reason) => warnings.push(skip(RecordType::Budget, index, id, reason)),
        }
    }

    Ok(SnapshotImport { snapshot, warnings })
}

fn field_as_string(value: &serde_json::Value, field: &str) -> Option<String> {
    value.get(field).and_then(|v| v.as_str()).map(String::from)
}

fn normalize_transaction(raw: RawTransaction) -> Result<Transaction, SkipReason> {
    let date_str = raw.date.ok_or(SkipReason::MissingField("date"))?;
    let date = parse_date(&date_str).ok_or(SkipReason::InvalidDate(date_str))?;

    let kind_str = raw.kind.ok_or(SkipReason::MissingField("type"))?;
    let kind = TransactionKind::parse(&kind_str).ok_or(SkipReason::UnknownKind(kind_str))?;

    let amount_raw = raw.amount.ok_or(SkipReason::MissingField("amount"))?;
    let amount = Money::from_dollars_f64(amount_raw)
        .ok_or_else(|| SkipReason::InvalidAmount(amount_raw.to_string()))?;

    Ok(Transaction {
        id: raw
            .id
            .filter(|s| !s.trim().is_empty())
            .map(TransactionId::from)
            .unwrap_or_else(TransactionId::new),
        kind,
        // Direction lives in `kind`; feeds that carry signed amounts
        // normalize to the same magnitude.
        amount: amount.abs(),
        description: raw
            .description
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        date,
        category: normalize_category(raw.category),
    })
}

fn normalize_budget(raw: RawBudget) -> Result<Budget, SkipReason> {
    let category =
        normalize_category(raw.category).ok_or(SkipReason::MissingField("category"))?;

    let amount_raw = raw.amount.ok_or(SkipReason::MissingField("amount"))?;
    let amount = Money::from_dollars_f64(amount_raw)
        .ok_or_else(|| SkipReason::InvalidAmount(amount_raw.to_string()))?;
    if amount.is_negative() {
        return Err(SkipReason::NegativeBudget(amount_raw.to_string()));
    }

    let month_str = raw.month.ok_or(SkipReason::MissingField("month"))?;
    let month = MonthKey::parse(&month_str).map_err(|_| SkipReason::InvalidMonth(month_str))?;

    Ok(Budget {
        id: raw
            .id
            .filter(|s| !s.trim().is_empty())
            .map(BudgetId::from)
            .unwrap_or_else(BudgetId::new),
        category,
        amount,
        month,
    })
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a record date: ISO "2024-07-01", or an RFC 3339 timestamp from
/// feeds that serialize full datetimes
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_txn(kind: &str, amount: f64, date: &str) -> RawTransaction {
        RawTransaction {
            id: Some("t1".to_string()),
            kind: Some(kind.to_string()),
            amount: Some(amount),
            description: Some("test".to_string()),
            date: Some(date.to_string()),
            category: Some("Food".to_string()),
        }
    }

    #[test]
    fn test_import_clean_records() {
        let transactions = vec![
            raw_txn("income", 3500.0, "2024-07-01"),
            raw_txn("expense", -120.5, "2024-07-02"),
        ];
        let budgets = vec![RawBudget {
            id: Some("b1".to_string()),
            category: Some("Food".to_string()),
            amount: Some(400.0),
            month: Some("2024-07".to_string()),
        }];

        let result = import_snapshot(transactions, budgets);
        assert!(result.warnings.is_empty());
        assert_eq!(result.snapshot.transactions.len(), 2);
        assert_eq!(result.snapshot.budgets.len(), 1);

        // Signed feed value becomes a magnitude; direction stays in kind.
        let expense = &result.snapshot.transactions[1];
        assert!(expense.is_expense());
        assert_eq!(expense.amount, Money::from_cents(12050));
        assert_eq!(expense.signed_amount(), Money::from_cents(-12050));

        let budget = &result.snapshot.budgets[0];
        assert_eq!(budget.month, MonthKey::new(2024, 7).unwrap());
        assert_eq!(budget.amount, Money::from_dollars(400));
    }

    #[test]
    fn test_skip_invalid_date() {
        let transactions = vec![
            raw_txn("income", 100.0, "2024-07-01"),
            raw_txn("expense", 50.0, "2024-13-01"),
            raw_txn("expense", 25.0, "2024-07-03"),
        ];

        let result = import_snapshot(transactions, Vec::new());
        assert_eq!(result.snapshot.transactions.len(), 2);
        assert_eq!(result.warnings.len(), 1);

        let warning = &result.warnings[0];
        assert_eq!(warning.record, RecordType::Transaction);
        assert_eq!(warning.index, 1);
        assert_eq!(warning.reason, SkipReason::InvalidDate("2024-13-01".to_string()));
    }

    #[test]
    fn test_skip_unknown_kind_and_missing_amount() {
        let mut transfer = raw_txn("transfer", 10.0, "2024-07-01");
        transfer.id = Some("t-transfer".to_string());
        let missing_amount = RawTransaction {
            amount: None,
            ..raw_txn("expense", 0.0, "2024-07-01")
        };

        let result = import_snapshot(vec![transfer, missing_amount], Vec::new());
        assert!(result.snapshot.transactions.is_empty());
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(
            result.warnings[0].reason,
            SkipReason::UnknownKind("transfer".to_string())
        );
        assert_eq!(result.warnings[1].reason, SkipReason::MissingField("amount"));
    }

    #[test]
    fn test_skip_non_finite_amount() {
        let result = import_snapshot(vec![raw_txn("expense", f64::NAN, "2024-07-01")], Vec::new());
        assert!(result.snapshot.transactions.is_empty());
        assert!(matches!(
            result.warnings[0].reason,
            SkipReason::InvalidAmount(_)
        ));
    }

    #[test]
    fn test_accepts_rfc3339_dates() {
        let result = import_snapshot(
            vec![raw_txn("income", 10.0, "2024-07-01T09:30:00Z")],
            Vec::new(),
        );
        assert!(result.warnings.is_empty());
        assert_eq!(
            result.snapshot.transactions[0].month(),
            MonthKey::new(2024, 7).unwrap()
        );
    }

    #[test]
    fn test_blank_category_becomes_none() {
        let mut raw = raw_txn("expense", 20.0, "2024-07-01");
        raw.category = Some("   ".to_string());
        let result = import_snapshot(vec![raw], Vec::new());
        assert_eq!(result.snapshot.transactions[0].category, None);
    }

    #[test]
    fn test_tolerated_fields_survive_ingestion() {
        let mut raw = raw_txn("expense", -20.0, "2024-07-01");
        raw.description = None;
        raw.category = None;

        let result = import_snapshot(vec![raw], Vec::new());
        assert!(result.warnings.is_empty());

        // The amount convention holds even for records validate() rejects.
        let txn = &result.snapshot.transactions[0];
        assert_eq!(txn.amount, Money::from_cents(2000));
        assert_eq!(txn.description, "");
        assert_eq!(txn.category, None);
        assert!(txn.validate().is_err());
    }

    #[test]
    fn test_missing_id_is_minted_and_given_id_passes_through() {
        let with_id = raw_txn("income", 10.0, "2024-07-01");
        let mut without_id = raw_txn("income", 10.0, "2024-07-01");
        without_id.id = None;

        let result = import_snapshot(vec![with_id, without_id], Vec::new());
        assert_eq!(result.snapshot.transactions[0].id.as_str(), "t1");
        assert!(!result.snapshot.transactions[1].id.as_str().is_empty());
    }

    #[test]
    fn test_budget_skips() {
        let budgets = vec![
            RawBudget {
                id: Some("b1".to_string()),
                category: Some("Food".to_string()),
                amount: Some(-400.0),
                month: Some("2024-07".to_string()),
            },
            RawBudget {
                id: Some("b2".to_string()),
                category: Some("Bills".to_string()),
                amount: Some(300.0),
                month: Some("soon".to_string()),
            },
            RawBudget {
                id: Some("b3".to_string()),
                category: None,
                amount: Some(100.0),
                month: Some("2024-07".to_string()),
            },
        ];

        let result = import_snapshot(Vec::new(), budgets);
        assert!(result.snapshot.budgets.is_empty());
        assert_eq!(result.warnings.len(), 3);
        assert_eq!(
            result.warnings[0].reason,
            SkipReason::NegativeBudget("-400".to_string())
        );
        assert_eq!(
            result.warnings[1].reason,
            SkipReason::InvalidMonth("soon".to_string())
        );
        assert_eq!(result.warnings[2].reason, SkipReason::MissingField("category"));
    }

    #[test]
    fn test_budget_legacy_month_label() {
        let budgets = vec![RawBudget {
            id: None,
            category: Some("Food".to_string()),
            amount: Some(400.0),
            month: Some("Jul 2024".to_string()),
        }];

        let result = import_snapshot(Vec::new(), budgets);
        assert!(result.warnings.is_empty());
        assert_eq!(result.snapshot.budgets[0].month.to_string(), "2024-07");
    }

    #[test]
    fn test_zero_budget_is_kept() {
        let budgets = vec![RawBudget {
            id: None,
            category: Some("Food".to_string()),
            amount: Some(0.0),
            month: Some("2024-07".to_string()),
        }];

        let result = import_snapshot(Vec::new(), budgets);
        assert!(result.warnings.is_empty());
        assert!(result.snapshot.budgets[0].amount.is_zero());
    }

    #[test]
    fn test_snapshot_from_json() {
        let transactions = r#"[
            {"id": "t1", "type": "income", "amount": 3500, "description": "Salary", "date": "2024-07-01"},
            {"id": "t2", "type": "expense", "amount": "not a number", "description": "Broken", "date": "2024-07-02"},
            {"id": "t3", "type": "expense", "amount": 120.5, "description": "Groceries", "date": "2024-07-02", "category": "Food"}
        ]"#;
        let budgets = r#"[{"id": "b1", "category": "Food", "amount": 400, "month": "2024-07"}]"#;

        let result = snapshot_from_json(transactions, budgets).unwrap();
        assert_eq!(result.snapshot.transactions.len(), 2);
        assert_eq!(result.snapshot.budgets.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].index, 1);
        assert_eq!(result.warnings[0].id.as_deref(), Some("t2"));
        assert!(matches!(result.warnings[0].reason, SkipReason::Malformed(_)));
    }

    #[test]
    fn test_snapshot_from_json_rejects_non_array() {
        assert!(snapshot_from_json("{\"not\": \"an array\"}", "[]").is_err());
        assert!(snapshot_from_json("[]", "garbage").is_err());
    }

    #[test]
    fn test_empty_payloads() {
        let result = snapshot_from_json("[]", "[]").unwrap();
        assert!(result.snapshot.transactions.is_empty());
        assert!(result.snapshot.budgets.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = ImportWarning {
            record: RecordType::Transaction,
            index: 3,
            id: Some("t9".to_string()),
            reason: SkipReason::InvalidDate("2024-13-01".to_string()),
        };
        assert_eq!(
            warning.to_string(),
            "transaction 3 (id t9): invalid date '2024-13-01'"
        );
    }
}
