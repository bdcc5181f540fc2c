//! Transaction model
//!
//! A transaction is an immutable record of money moving in or out. The
//! stored amount is always a non-negative magnitude; direction lives in the
//! kind. Ingestion enforces that convention, `validate` re-checks it for
//! records built by hand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use super::month::MonthKey;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse a kind from loosely formatted input ("Income", " expense ")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (opaque; upstream ids pass through unchanged)
    pub id: TransactionId,

    /// Direction of the movement
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Magnitude of the movement; never negative
    pub amount: Money,

    /// Free-text description
    pub description: String,

    /// Date the transaction occurred
    pub date: NaiveDate,

    /// Spending category; expected for expenses, absent for most income
    pub category: Option<String>,
}

impl Transaction {
    /// Create an income record with a fresh id
    pub fn income(description: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: TransactionId::new(),
            kind: TransactionKind::Income,
            amount: amount.abs(),
            description: description.into(),
            date,
            category: None,
        }
    }

    /// Create an expense record with a fresh id
    pub fn expense(
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind: TransactionKind::Expense,
            amount: amount.abs(),
            description: description.into(),
            date,
            category: Some(category.into()),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The amount with its direction applied: positive for income,
    /// negative for expenses. Balances sum this.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// The month this transaction falls in
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Validate model invariants for hand-built records
    ///
    /// Ingestion guarantees the amount convention but tolerates blank
    /// descriptions and category-less expenses, so its records can still
    /// fail here; the form layer calls this before accepting user input.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        if self.is_expense() && self.category.as_deref().map_or(true, |c| c.trim().is_empty()) {
            return Err(TransactionValidationError::ExpenseWithoutCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    EmptyDescription,
    ExpenseWithoutCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(m) => {
                write!(f, "Amount must be a non-negative magnitude, got {}", m)
            }
            Self::EmptyDescription => write!(f, "Description must not be empty"),
            Self::ExpenseWithoutCategory => write!(f, "Expense records need a category"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
