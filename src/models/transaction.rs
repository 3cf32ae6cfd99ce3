//! Transaction model
//!
//! Transactions are recorded elsewhere; the engine reads them to measure spend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::period::Period;

/// Classification of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
    Transfer,
    #[serde(other)]
    Other,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
            Self::Transfer => write!(f, "transfer"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A single recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Signed amount; expenses may be stored negative or positive
    pub amount: Money,

    /// Posting date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Absent for uncategorized transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        amount: Money,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id,
            amount,
            date,
            transaction_type,
            category_id: None,
            description: String::new(),
        }
    }

    /// An expense filed under a category
    pub fn expense(id: i64, date: NaiveDate, amount: Money, category_id: CategoryId) -> Self {
        let mut txn = Self::new(
            TransactionId::new(id),
            date,
            amount,
            TransactionType::Expense,
        );
        txn.category_id = Some(category_id);
        txn
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }

    /// True when this transaction counts toward spend for `period`
    ///
    /// Only categorized expenses dated inside the period are tracked;
    /// uncategorized expenses never count.
    pub fn counts_as_spend_in(&self, period: &Period) -> bool {
        self.is_expense() && self.is_categorized() && period.contains(self.date)
    }

    /// Magnitude of the amount regardless of sign convention
    pub fn spend(&self) -> Money {
        self.amount.abs()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.transaction_type,
            self.amount
        )
    }
}
