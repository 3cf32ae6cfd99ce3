//! Custom error types for the budget reconciler
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

use crate::models::BudgetId;
use crate::services::reconcile::ReconcileSummary;

/// A call made against a [`crate::storage::BudgetStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    ListBudgets,
    ListTransactions,
    ListCategories,
    CreateBudget,
    UpdateBudget,
    DeleteBudget,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOperation::ListBudgets => "list_budgets",
            StoreOperation::ListTransactions => "list_transactions",
            StoreOperation::ListCategories => "list_categories",
            StoreOperation::CreateBudget => "create_budget",
            StoreOperation::UpdateBudget => "update_budget",
            StoreOperation::DeleteBudget => "delete_budget",
        };
        write!(f, "{}", name)
    }
}

/// The main error type for budget reconciler operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Listing budgets, transactions or categories failed
    #[error("Failed to {operation}: {message}")]
    StoreRead {
        operation: StoreOperation,
        message: String,
    },

    /// Creating, updating or deleting a budget failed
    #[error("Failed to {operation}: {message}")]
    StoreWrite {
        operation: StoreOperation,
        message: String,
    },

    /// The store accepted a budget write but the audit log did not record it
    #[error("Budget {budget_id} was saved but not audited: {source}")]
    WriteNotAudited {
        budget_id: BudgetId,
        #[source]
        source: Box<BudgetError>,
    },

    /// Auto-generation stopped part way; budgets written so far are kept
    #[error(
        "Auto-generate failed after {} carried forward and {} created: {source}",
        .progress.carried_forward,
        .progress.created
    )]
    ReconcileInterrupted {
        progress: ReconcileSummary,
        #[source]
        source: Box<BudgetError>,
    },
}

impl BudgetError {
    /// Wrap a store failure from a list operation
    pub fn read(operation: StoreOperation, err: impl fmt::Display) -> Self {
        Self::StoreRead {
            operation,
            message: err.to_string(),
        }
    }

    /// Wrap a store failure from a write operation
    pub fn write(operation: StoreOperation, err: impl fmt::Display) -> Self {
        Self::StoreWrite {
            operation,
            message: err.to_string(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when the store accepted the write this error reports on
    pub fn is_write_committed(&self) -> bool {
        matches!(self, Self::WriteNotAudited { .. })
    }

    /// The store call that failed, if this error came from the store seam
    pub fn operation(&self) -> Option<StoreOperation> {
        match self {
            Self::StoreRead { operation, .. } | Self::StoreWrite { operation, .. } => {
                Some(*operation)
            }
            Self::ReconcileInterrupted { source, .. } => source.operation(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for budget reconciler operations
pub type BudgetResult<T> = Result<T, BudgetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetError::budget_not_found("42");
        assert_eq!(err.to_string(), "Budget not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_errors_name_operation() {
        let err = BudgetError::read(StoreOperation::ListCategories, "connection reset");
        assert_eq!(
            err.to_string(),
            "Failed to list_categories: connection reset"
        );
        assert_eq!(err.operation(), Some(StoreOperation::ListCategories));

        let err = BudgetError::write(StoreOperation::CreateBudget, "disk full");
        assert!(matches!(err, BudgetError::StoreWrite { .. }));
        assert_eq!(err.to_string(), "Failed to create_budget: disk full");
    }

    #[test]
    fn test_interrupted_reports_progress() {
        let err = BudgetError::ReconcileInterrupted {
            progress: ReconcileSummary {
                created: 2,
                skipped: 1,
                carried_forward: 3,
            },
            source: Box::new(BudgetError::write(StoreOperation::CreateBudget, "disk full")),
        };
        let message = err.to_string();
        assert!(message.contains("3 carried forward"));
        assert!(message.contains("2 created"));
        assert_eq!(err.operation(), Some(StoreOperation::CreateBudget));
    }

    #[test]
    fn test_unaudited_write_is_committed() {
        let err = BudgetError::WriteNotAudited {
            budget_id: BudgetId::new(4),
            source: Box::new(BudgetError::Io("Is a directory".into())),
        };
        assert!(err.is_write_committed());
        assert_eq!(err.operation(), None);
        assert!(err.to_string().starts_with("Budget 4 was saved but not audited"));
        assert!(!BudgetError::Io("x".into()).is_write_committed());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetError = io_err.into();
        assert!(matches!(err, BudgetError::Io(_)));
    }
}
