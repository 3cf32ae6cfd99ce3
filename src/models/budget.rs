//! Budget model
//!
//! A budget is the amount set aside for one category in one period.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::Period;

/// A committed budget for a category in a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category_id: CategoryId,

    /// Non-negative amount budgeted
    pub amount: Money,

    /// The period this budget belongs to
    pub month: Period,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_amount(self.amount)
    }

    /// The request that would recreate this budget in another period
    ///
    /// Used when carrying a budget forward: category, amount and notes are kept.
    pub fn carry_to(&self, period: Period) -> NewBudget {
        NewBudget {
            category_id: self.category_id,
            amount: self.amount,
            month: period,
            notes: self.notes.clone(),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} category {} budgeted: {}",
            self.month, self.category_id, self.amount
        )
    }
}

/// A budget that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category_id: CategoryId,
    pub amount: Money,
    pub month: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewBudget {
    pub fn new(category_id: CategoryId, amount: Money, month: Period) -> Self {
        Self {
            category_id,
            amount,
            month,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_amount(self.amount)
    }

    /// Assign an id and creation time
    pub fn into_budget(self, id: BudgetId) -> Budget {
        Budget {
            id,
            category_id: self.category_id,
            amount: self.amount,
            month: self.month,
            notes: self.notes,
            created_at: Utc::now(),
        }
    }
}

fn validate_amount(amount: Money) -> Result<(), BudgetValidationError> {
    if amount.is_negative() {
        return Err(BudgetValidationError::NegativeBudget);
    }
    Ok(())
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeBudget,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBudget => write!(f, "Budget amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
