//! Storage layer
//!
//! [`BudgetStore`] is the seam the engine talks to. [`Storage`] is the
//! bundled implementation: JSON files with atomic writes under the data
//! directory.

pub mod budget;
pub mod categories;
pub mod file_io;
pub mod transactions;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::config::paths::ReconcilerPaths;
use crate::error::BudgetError;
use crate::models::{Budget, BudgetId, Category, NewBudget, Period, Transaction};

/// External budget/transaction store the engine reads from and writes to
///
/// Write operations return the refreshed budget list for the affected period.
/// Implementations decide durability; the engine never retries a call.
pub trait BudgetStore {
    fn list_budgets(&self, period: &Period) -> Result<Vec<Budget>, BudgetError>;

    /// The full transaction history; period filtering is the caller's job
    fn list_transactions(&self) -> Result<Vec<Transaction>, BudgetError>;

    fn list_categories(&self) -> Result<Vec<Category>, BudgetError>;

    fn create_budget(&self, budget: NewBudget) -> Result<Vec<Budget>, BudgetError>;

    fn update_budget(&self, budget: Budget) -> Result<Vec<Budget>, BudgetError>;

    fn delete_budget(&self, id: BudgetId) -> Result<Vec<Budget>, BudgetError>;
}

/// JSON-file store providing access to all repositories
pub struct Storage {
    paths: ReconcilerPaths,
    pub budgets: BudgetRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ReconcilerPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ReconcilerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BudgetError> {
        self.budgets.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.budgets.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        Ok(())
    }
}

impl BudgetStore for Storage {
    fn list_budgets(&self, period: &Period) -> Result<Vec<Budget>, BudgetError> {
        self.budgets.get_for_period(period)
    }

    fn list_transactions(&self) -> Result<Vec<Transaction>, BudgetError> {
        self.transactions.get_all()
    }

    fn list_categories(&self) -> Result<Vec<Category>, BudgetError> {
        self.categories.get_all()
    }

    fn create_budget(&self, budget: NewBudget) -> Result<Vec<Budget>, BudgetError> {
        let created = self.budgets.insert(budget)?;
        self.budgets.save()?;
        self.budgets.get_for_period(&created.month)
    }

    fn update_budget(&self, budget: Budget) -> Result<Vec<Budget>, BudgetError> {
        let updated = self.budgets.update(budget)?;
        self.budgets.save()?;
        self.budgets.get_for_period(&updated.month)
    }

    fn delete_budget(&self, id: BudgetId) -> Result<Vec<Budget>, BudgetError> {
        let deleted = self
            .budgets
            .delete(id)?
            .ok_or_else(|| BudgetError::budget_not_found(id.to_string()))?;
        self.budgets.save()?;
        self.budgets.get_for_period(&deleted.month)
    }
}
