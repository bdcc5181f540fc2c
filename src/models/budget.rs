//! Budget model
//!
//! A budget is a spending ceiling for one category in one month. Ceilings
//! are plain amounts, not envelopes: nothing rolls over, and the comparison
//! report recomputes utilization from the transaction history each time.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::month::MonthKey;

/// A spending ceiling for a category in a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier (opaque; upstream ids pass through unchanged)
    pub id: BudgetId,

    /// Category the ceiling applies to
    pub category: String,

    /// The ceiling. Zero is legal; the comparison guards its division.
    pub amount: Money,

    /// Month the ceiling applies to
    pub month: MonthKey,
}

impl Budget {
    /// Create a budget with a fresh id
    pub fn new(category: impl Into<String>, amount: Money, month: MonthKey) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            amount,
            month,
        }
    }

    /// Validate model invariants for hand-built records
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeCeiling(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.category, self.month, self.amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategory,
    NegativeCeiling(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Budget category must not be empty"),
            Self::NegativeCeiling(m) => write!(f, "Budget ceiling cannot be negative, got {}", m),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn july() -> MonthKey {
        MonthKey::new(2024, 7).unwrap()
    }

    #[test]
    fn test_new_budget() {
        let b = Budget::new("Food", Money::from_dollars(400), july());
        assert_eq!(b.category, "Food");
        assert_eq!(b.amount.cents(), 40_000);
        assert_eq!(b.month, july());
        assert!(!b.id.as_str().is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(Budget::new("Food", Money::from_dollars(400), july())
            .validate()
            .is_ok());
        assert!(Budget::new("Food", Money::zero(), july()).validate().is_ok());

        assert_eq!(
            Budget::new("  ", Money::from_dollars(400), july()).validate(),
            Err(BudgetValidationError::EmptyCategory)
        );
        assert!(matches!(
            Budget::new("Food", Money::from_cents(-1), july()).validate(),
            Err(BudgetValidationError::NegativeCeiling(_))
        ));
    }

    #[test]
    fn test_display() {
        let b = Budget::new("Food", Money::from_dollars(400), july());
        assert_eq!(b.to_string(), "Food 2024-07: $400.00");
    }

    #[test]
    fn test_serialization() {
        let b = Budget::new("Bills", Money::from_cents(30_000), july());
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["month"], "2024-07");
        assert_eq!(json["amount"], 30_000);

        let back: Budget = serde_json::from_value(json).unwrap();
        assert_eq!(back, b);
    }
}
