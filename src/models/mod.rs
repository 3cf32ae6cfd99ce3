//! Core data models
//!
//! Budgets, categories and transactions, plus the money and period types
//! they are measured in.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError, NewBudget};
pub use category::{Category, CategoryType};
pub use ids::{BudgetId, CategoryId, TransactionId};
pub use money::Money;
pub use period::{Period, PeriodParseError};
pub use transaction::{Transaction, TransactionType};
