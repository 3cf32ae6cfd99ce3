//! Period aggregation
//!
//! Summarizes one period: how much was budgeted, how much was spent, what is
//! left and how much of the budget has been used. Everything here is pure;
//! the same inputs always give the same figures.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Budget, CategoryId, Money, Period, Transaction};

/// Summary figures for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodAggregate {
    pub period: Period,

    /// Sum of budget amounts in the period
    pub total_budget: Money,

    /// Sum of |amount| over categorized expenses dated in the period
    pub total_spent: Money,

    /// `total_budget - total_spent`, negative when overspent
    pub remaining: Money,

    /// `100 * total_spent / total_budget`, or 0 with no budget; may exceed 100
    pub progress_percent: f64,
}

impl PeriodAggregate {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Aggregate budgets and transactions for `period`
///
/// Both slices may hold data from any period; entries outside `period` are
/// ignored. Uncategorized expenses are not counted as spend.
pub fn aggregate(period: &Period, budgets: &[Budget], transactions: &[Transaction]) -> PeriodAggregate {
    let total_budget: Money = budgets
        .iter()
        .filter(|b| &b.month == period)
        .map(|b| b.amount)
        .sum();

    let total_spent: Money = transactions
        .iter()
        .filter(|t| t.counts_as_spend_in(period))
        .map(Transaction::spend)
        .sum();

    PeriodAggregate {
        period: *period,
        total_budget,
        total_spent,
        remaining: total_budget - total_spent,
        progress_percent: total_spent.percent_of(total_budget),
    }
}

/// Spend per category for `period`, using the same rules as [`aggregate`]
pub fn spend_by_category(period: &Period, transactions: &[Transaction]) -> BTreeMap<CategoryId, Money> {
    let mut spending = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.counts_as_spend_in(period)) {
        if let Some(category_id) = txn.category_id {
            *spending.entry(category_id).or_insert_with(Money::zero) += txn.spend();
        }
    }
    spending
}
