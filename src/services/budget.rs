//! Budget service
//!
//! Business logic for budget CRUD on top of a [`BudgetStore`]: validation,
//! the one-budget-per-category rule, audit logging and change notifications.
//! Store failures are wrapped with the operation that failed so callers can
//! surface them.

use crate::audit::{AuditEntry, AuditLogger, WriteOrigin};
use crate::error::{BudgetError, BudgetResult, StoreOperation};
use crate::events::{BudgetEvent, BudgetEventKind, ChangeNotifier};
use crate::models::{Budget, BudgetId, Category, NewBudget, Period, Transaction};
use crate::services::aggregate::{aggregate, PeriodAggregate};
use crate::storage::BudgetStore;

/// Service for budget management
pub struct BudgetService<'a, S: BudgetStore + ?Sized> {
    store: &'a S,
    audit: Option<AuditLogger>,
    notifier: ChangeNotifier,
}

impl<'a, S: BudgetStore + ?Sized> BudgetService<'a, S> {
    /// Create a new budget service without auditing
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            audit: None,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Record every successful write to `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Budgets for a period
    pub fn list(&self, period: &Period) -> BudgetResult<Vec<Budget>> {
        self.store
            .list_budgets(period)
            .map_err(|e| BudgetError::read(StoreOperation::ListBudgets, e))
    }

    /// Every transaction the store knows about
    pub fn transactions(&self) -> BudgetResult<Vec<Transaction>> {
        self.store
            .list_transactions()
            .map_err(|e| BudgetError::read(StoreOperation::ListTransactions, e))
    }

    /// Every category the store knows about
    pub fn categories(&self) -> BudgetResult<Vec<Category>> {
        self.store
            .list_categories()
            .map_err(|e| BudgetError::read(StoreOperation::ListCategories, e))
    }

    /// Totals for a period, read fresh from the store
    pub fn summary(&self, period: &Period) -> BudgetResult<PeriodAggregate> {
        let budgets = self.list(period)?;
        let transactions = self.transactions()?;
        Ok(aggregate(period, &budgets, &transactions))
    }

    /// Create a budget
    ///
    /// Fails with `Duplicate` if the category already has a budget in the
    /// period. Returns the refreshed budget list for the period.
    pub fn create(&self, new: NewBudget) -> BudgetResult<Vec<Budget>> {
        let existing = self.list(&new.month)?;
        if existing.iter().any(|b| b.category_id == new.category_id) {
            return Err(BudgetError::Duplicate {
                entity_type: "Budget",
                identifier: format!("category {} in {}", new.category_id, new.month),
            });
        }

        self.insert(new, WriteOrigin::Manual)
    }

    /// Write a budget the caller already checked for duplicates
    pub(crate) fn insert(&self, new: NewBudget, origin: WriteOrigin) -> BudgetResult<Vec<Budget>> {
        new.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let category_id = new.category_id;
        let period = new.month;
        let budgets = self
            .store
            .create_budget(new)
            .map_err(|e| BudgetError::write(StoreOperation::CreateBudget, e))?;

        match budgets.iter().find(|b| b.category_id == category_id) {
            Some(created) => {
                tracing::debug!(
                    budget_id = %created.id,
                    category_id = %category_id,
                    period = %period,
                    amount = %created.amount,
                    %origin,
                    "budget created"
                );
                self.notify(BudgetEventKind::Created, period, created.id);
                self.record(AuditEntry::create(created, origin))?;
            }
            None => tracing::warn!(
                category_id = %category_id,
                period = %period,
                "store did not return the budget it created"
            ),
        }

        Ok(budgets)
    }

    /// Update an existing budget
    ///
    /// The budget is looked up in its own period; moving it to another
    /// category that is already budgeted is rejected.
    pub fn update(&self, budget: Budget) -> BudgetResult<Vec<Budget>> {
        budget
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let existing = self.list(&budget.month)?;
        let before = existing
            .iter()
            .find(|b| b.id == budget.id)
            .cloned()
            .ok_or_else(|| BudgetError::budget_not_found(budget.id.to_string()))?;

        if existing
            .iter()
            .any(|b| b.id != budget.id && b.category_id == budget.category_id)
        {
            return Err(BudgetError::Duplicate {
                entity_type: "Budget",
                identifier: format!("category {} in {}", budget.category_id, budget.month),
            });
        }

        let budget = Budget {
            created_at: before.created_at,
            ..budget
        };
        let id = budget.id;
        let period = budget.month;
        let budgets = self
            .store
            .update_budget(budget)
            .map_err(|e| BudgetError::write(StoreOperation::UpdateBudget, e))?;

        self.notify(BudgetEventKind::Updated, period, id);
        if let Some(after) = budgets.iter().find(|b| b.id == id) {
            tracing::debug!(budget_id = %id, period = %period, amount = %after.amount, "budget updated");
            self.record(AuditEntry::update(&before, after))?;
        }

        Ok(budgets)
    }

    /// Delete a budget from `period`
    pub fn delete(&self, id: BudgetId, period: &Period) -> BudgetResult<Vec<Budget>> {
        let before = self
            .list(period)?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| BudgetError::budget_not_found(id.to_string()))?;

        let budgets = self
            .store
            .delete_budget(id)
            .map_err(|e| BudgetError::write(StoreOperation::DeleteBudget, e))?;

        tracing::debug!(budget_id = %id, period = %period, "budget deleted");
        self.notify(BudgetEventKind::Deleted, *period, id);
        self.record(AuditEntry::delete(&before))?;

        Ok(budgets)
    }

    /// Audit a write the store has already accepted
    fn record(&self, entry: AuditEntry) -> BudgetResult<()> {
        let Some(logger) = &self.audit else {
            return Ok(());
        };
        logger.log(&entry).map_err(|e| {
            tracing::warn!(budget_id = %entry.budget_id, error = %e, "audit log write failed");
            BudgetError::WriteNotAudited {
                budget_id: entry.budget_id,
                source: Box::new(e),
            }
        })
    }

    fn notify(&self, kind: BudgetEventKind, period: Period, budget_id: BudgetId) {
        self.notifier.publish(BudgetEvent {
            kind,
            period,
            budget_id,
        });
    }
}
