//! Service layer for the budget reconciler
//!
//! The service layer provides business logic on top of the store seam:
//! period aggregation, category eligibility, budget CRUD with auditing and
//! change events, and the two-pass auto-generation.

pub mod aggregate;
pub mod budget;
pub mod category_filter;
pub mod reconcile;

pub use aggregate::{aggregate, spend_by_category, PeriodAggregate};
pub use budget::BudgetService;
pub use category_filter::CategoryFilter;
pub use reconcile::{ReconcileSummary, Reconciler};
