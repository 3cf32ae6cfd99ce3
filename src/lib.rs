//! Budget Reconciler - period budgets, spend tracking and auto-generation
//!
//! This library keeps monthly budgets per spending category, reports how a
//! period's spend compares to its budgets, and fills in a new period's
//! budgets from the period before it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (periods, budgets, categories, transactions)
//! - `storage`: The `BudgetStore` seam and its JSON file implementation
//! - `services`: Aggregation, category eligibility, budget CRUD, auto-generation
//! - `audit`: Audit logging of budget writes
//! - `events`: Budget change notifications
//! - `cli`: Command handlers for the `budgetrec` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_reconciler::config::paths::ReconcilerPaths;
//! use budget_reconciler::services::{BudgetService, CategoryFilter, Reconciler};
//! use budget_reconciler::storage::Storage;
//!
//! let mut storage = Storage::new(ReconcilerPaths::new()?)?;
//! storage.load_all()?;
//! let service = BudgetService::new(&storage);
//! let filter = CategoryFilter::default();
//! let summary = Reconciler::new(&service, &filter).reconcile(&period)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod services;
pub mod storage;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use error::{BudgetError, BudgetResult};

static INIT_TRACING: Once = Once::new();

/// Default filter when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "budget_reconciler=info";

/// Install the global tracing subscriber
///
/// `RUST_LOG` replaces the default filter entirely when set.
/// Output goes to stderr so command output stays clean.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::fmt;

        fmt()
            .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
            .with_writer(std::io::stderr)
            .init();
    });
}

fn log_filter(rust_log: Option<String>) -> EnvFilter {
    match rust_log.filter(|value| !value.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
    }

    #[test]
    fn rust_log_overrides_default_filter() {
        let filter = super::log_filter(Some("budget_reconciler=debug".into()));
        assert_eq!(filter.to_string(), "budget_reconciler=debug");
    }

    #[test]
    fn default_filter_when_unset() {
        assert_eq!(super::log_filter(None).to_string(), "budget_reconciler=info");
        assert_eq!(
            super::log_filter(Some("  ".into())).to_string(),
            "budget_reconciler=info"
        );
    }
}
