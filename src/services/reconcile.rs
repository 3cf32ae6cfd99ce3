//! Budget auto-generation
//!
//! Fills in a period's budgets from the period before it, in two passes:
//!
//! 1. Carry forward: every budget in the previous period whose category has
//!    no budget yet in the target period is copied over (amount and notes).
//! 2. Seed from spend: every eligible category still without a budget gets
//!    one equal to what was spent on it in the previous period (zero if
//!    nothing was spent).
//!
//! Existing budgets are never touched, so running it twice is a no-op the
//! second time. Writes are not transactional: if the store fails part way,
//! budgets already written stay and the error reports how far it got.

use std::collections::HashSet;

use serde::Serialize;

use crate::audit::WriteOrigin;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, CategoryId, Money, NewBudget, Period};
use crate::services::aggregate::spend_by_category;
use crate::services::budget::BudgetService;
use crate::services::category_filter::CategoryFilter;
use crate::storage::BudgetStore;

/// Counts from one auto-generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Budgets seeded from previous-period spend
    pub created: usize,

    /// Eligible categories that already had a budget
    pub skipped: usize,

    /// Budgets copied from the previous period
    pub carried_forward: usize,
}

impl ReconcileSummary {
    /// Total budgets written
    pub fn written(&self) -> usize {
        self.created + self.carried_forward
    }

    /// The completion message shown to the user
    ///
    /// The skipped count is only mentioned when something was skipped.
    pub fn message(&self) -> String {
        let mut message = format!(
            "Auto-generate completed: Created {} new budget(s)",
            self.created
        );
        if self.skipped > 0 {
            message.push_str(&format!(", skipped {} existing budget(s)", self.skipped));
        }
        message
    }
}

/// Runs auto-generation against a budget service
pub struct Reconciler<'s, 'a, S: BudgetStore + ?Sized> {
    service: &'s BudgetService<'a, S>,
    filter: &'s CategoryFilter,
}

impl<'s, 'a, S: BudgetStore + ?Sized> Reconciler<'s, 'a, S> {
    pub fn new(service: &'s BudgetService<'a, S>, filter: &'s CategoryFilter) -> Self {
        Self { service, filter }
    }

    /// Auto-generate budgets for `period`
    ///
    /// Read failures before the first write are returned as-is. Any failure
    /// after a write is wrapped in [`BudgetError::ReconcileInterrupted`]
    /// carrying the counts so far.
    pub fn reconcile(&self, period: &Period) -> BudgetResult<ReconcileSummary> {
        let previous = period.previous();
        let mut summary = ReconcileSummary::default();

        tracing::info!(period = %period, previous = %previous, "auto-generating budgets");

        let current = self.service.list(period)?;
        let prior = self.service.list(&previous)?;
        let transactions = self.service.transactions()?;
        let categories = self.service.categories()?;

        let mut budgeted: HashSet<CategoryId> = current.iter().map(|b| b.category_id).collect();

        for budget in &prior {
            if !budgeted.insert(budget.category_id) {
                continue;
            }
            let written = self
                .service
                .insert(budget.carry_to(*period), WriteOrigin::CarryForward);
            if let Err(e) = tally(written, &mut summary.carried_forward) {
                return Err(interrupted(summary, e));
            }
        }

        // Pass 2 works from the store's view after pass 1, not the local set.
        let budgeted: HashSet<CategoryId> = match self.service.list(period) {
            Ok(budgets) => budgets.iter().map(|b| b.category_id).collect(),
            Err(e) => return Err(interrupted(summary, e)),
        };
        let spending = spend_by_category(&previous, &transactions);
        let mut seeded = HashSet::new();

        for category in self.filter.eligible(&categories) {
            if budgeted.contains(&category.id) {
                summary.skipped += 1;
                continue;
            }
            if !seeded.insert(category.id) {
                continue;
            }

            let amount = spending.get(&category.id).copied().unwrap_or_else(Money::zero);
            tracing::debug!(category = %category.name, amount = %amount, "seeding budget from spend");
            let written = self.service.insert(
                NewBudget::new(category.id, amount, *period),
                WriteOrigin::SpendSeeded,
            );
            if let Err(e) = tally(written, &mut summary.created) {
                return Err(interrupted(summary, e));
            }
        }

        tracing::info!(
            period = %period,
            carried_forward = summary.carried_forward,
            created = summary.created,
            skipped = summary.skipped,
            "auto-generate completed"
        );

        Ok(summary)
    }
}

/// Count a write the store accepted, even when the error came after it
fn tally(result: BudgetResult<Vec<Budget>>, count: &mut usize) -> BudgetResult<()> {
    match result {
        Ok(_) => {
            *count += 1;
            Ok(())
        }
        Err(e) => {
            if e.is_write_committed() {
                *count += 1;
            }
            Err(e)
        }
    }
}

fn interrupted(progress: ReconcileSummary, source: BudgetError) -> BudgetError {
    if progress.written() == 0 {
        return source;
    }
    tracing::warn!(
        carried_forward = progress.carried_forward,
        created = progress.created,
        error = %source,
        "auto-generate interrupted"
    );
    BudgetError::ReconcileInterrupted {
        progress,
        source: Box::new(source),
    }
}
