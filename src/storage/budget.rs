//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json. Besides plain CRUD the
//! repository refuses a second budget for the same category in a period.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Budget, BudgetId, CategoryId, NewBudget, Period};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<BTreeMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| a.month.cmp(&b.month).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &BudgetData { budgets: list })
    }

    /// Get a budget by id
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, BudgetError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// Get all budgets for a period, in id order
    pub fn get_for_period(&self, period: &Period) -> Result<Vec<Budget>, BudgetError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .values()
            .filter(|b| &b.month == period)
            .cloned()
            .collect())
    }

    /// Insert a new budget, assigning the next free id
    pub fn insert(&self, new: NewBudget) -> Result<Budget, BudgetError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if budgets
            .values()
            .any(|b| b.category_id == new.category_id && b.month == new.month)
        {
            return Err(duplicate(new.category_id, &new.month));
        }

        let id = budgets
            .keys()
            .next_back()
            .map(BudgetId::next)
            .unwrap_or(BudgetId::new(1));
        let budget = new.into_budget(id);
        budgets.insert(id, budget.clone());
        Ok(budget)
    }

    /// Replace an existing budget
    ///
    /// The stored id and created_at are kept; the caller cannot change them.
    pub fn update(&self, budget: Budget) -> Result<Budget, BudgetError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let created_at = budgets
            .get(&budget.id)
            .map(|existing| existing.created_at)
            .ok_or_else(|| BudgetError::budget_not_found(budget.id.to_string()))?;

        if budgets.values().any(|b| {
            b.id != budget.id && b.category_id == budget.category_id && b.month == budget.month
        }) {
            return Err(duplicate(budget.category_id, &budget.month));
        }

        let updated = Budget {
            created_at,
            ..budget
        };
        budgets.insert(updated.id, updated.clone());
        Ok(updated)
    }

    /// Delete a budget, returning it if it existed
    pub fn delete(&self, id: BudgetId) -> Result<Option<Budget>, BudgetError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(&id))
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, BudgetError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.len())
    }
}

fn duplicate(category_id: CategoryId, period: &Period) -> BudgetError {
    BudgetError::Duplicate {
        entity_type: "Budget",
        identifier: format!("category {} in {}", category_id, period),
    }
}
