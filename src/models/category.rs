//! Category model
//!
//! Categories are owned by an external catalog; the engine only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// How a category classifies the transactions filed under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Expense,
    Income,
    Transfer,
    /// Any classification this crate does not act on
    #[serde(other)]
    Other,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryType::Expense => write!(f, "expense"),
            CategoryType::Income => write!(f, "income"),
            CategoryType::Transfer => write!(f, "transfer"),
            CategoryType::Other => write!(f, "other"),
        }
    }
}

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            id,
            name: name.into(),
            category_type,
        }
    }

    /// Shorthand for an expense category
    pub fn expense(id: i64, name: impl Into<String>) -> Self {
        Self::new(CategoryId::new(id), name, CategoryType::Expense)
    }

    pub fn is_expense(&self) -> bool {
        self.category_type == CategoryType::Expense
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
