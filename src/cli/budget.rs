//! Budget CLI commands
//!
//! Implements CLI commands for budget management: period summary, listing,
//! manual create/edit/delete, auto-generation and the audit history.

use clap::Subcommand;

use crate::audit::AuditLogger;
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetId, CategoryId, Money, NewBudget, Period};
use crate::services::{BudgetService, CategoryFilter, Reconciler};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show totals for a period
    Summary {
        /// Budget period (e.g., "2025-01", "current", "last", "next")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List budgets for a period
    List {
        /// Budget period (e.g., "2025-01", "current", "last", "next")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Create a budget for a category
    Add {
        /// Category ID
        category: String,
        /// Amount (e.g., "100" or "100.00")
        amount: String,
        /// Budget period
        #[arg(short, long)]
        period: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Edit an existing budget
    Edit {
        /// Budget ID
        id: String,
        /// New category ID
        #[arg(long)]
        category: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New notes (empty string clears them)
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
    },

    /// Fill in a period's budgets from the previous period
    #[command(alias = "auto")]
    Autogen {
        /// Budget period to generate (defaults to current)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show recent budget changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetResult<()> {
    let audit_log = storage.paths().audit_log();
    let mut service = BudgetService::new(storage);
    if settings.audit_enabled {
        service = service.with_audit(AuditLogger::new(audit_log.clone()));
    }
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Summary { period } => {
            let period = parse_period_arg(period.as_deref())?;
            print_summary(&service, &period, symbol)?;
        }

        BudgetCommands::List { period } => {
            let period = parse_period_arg(period.as_deref())?;
            let budgets = service.list(&period)?;

            println!("Budgets for {}", period);
            println!("{}", "=".repeat(60));

            if budgets.is_empty() {
                println!("No budgets for this period.");
                println!("Run 'budgetrec autogen -p {}' to fill them in.", period);
                return Ok(());
            }

            println!("{:>6}  {:24} {:>12}  Notes", "ID", "Category", "Amount");
            println!("{}", "-".repeat(60));
            for budget in &budgets {
                let name = storage
                    .categories
                    .get(budget.category_id)?
                    .map(|c| c.name)
                    .unwrap_or_else(|| format!("#{}", budget.category_id));
                println!(
                    "{:>6}  {:24} {:>12}  {}",
                    budget.id,
                    name,
                    budget.amount.format_with_symbol(symbol),
                    budget.notes.as_deref().unwrap_or("")
                );
            }
        }

        BudgetCommands::Add {
            category,
            amount,
            period,
            notes,
        } => {
            let period = parse_period_arg(period.as_deref())?;
            let category_id: CategoryId = parse_id(&category, "category")?;
            let category = storage
                .categories
                .get(category_id)?
                .ok_or_else(|| BudgetError::category_not_found(category_id.to_string()))?;
            let amount = parse_amount(&amount)?;

            let mut new = NewBudget::new(category_id, amount, period);
            if let Some(notes) = notes.filter(|n| !n.is_empty()) {
                new = new.with_notes(notes);
            }
            service.create(new)?;

            println!(
                "Budgeted {} for '{}' in {}",
                amount.format_with_symbol(symbol),
                category.name,
                period
            );
        }

        BudgetCommands::Edit {
            id,
            category,
            amount,
            notes,
        } => {
            let id: BudgetId = parse_id(&id, "budget")?;
            let mut budget = storage
                .budgets
                .get(id)?
                .ok_or_else(|| BudgetError::budget_not_found(id.to_string()))?;

            if let Some(category) = category {
                let category_id: CategoryId = parse_id(&category, "category")?;
                if storage.categories.get(category_id)?.is_none() {
                    return Err(BudgetError::category_not_found(category_id.to_string()));
                }
                budget.category_id = category_id;
            }
            if let Some(amount) = amount {
                budget.amount = parse_amount(&amount)?;
            }
            if let Some(notes) = notes {
                budget.notes = Some(notes).filter(|n| !n.is_empty());
            }

            let period = budget.month;
            service.update(budget)?;
            println!("Updated budget {} in {}", id, period);
        }

        BudgetCommands::Delete { id } => {
            let id: BudgetId = parse_id(&id, "budget")?;
            let budget = storage
                .budgets
                .get(id)?
                .ok_or_else(|| BudgetError::budget_not_found(id.to_string()))?;

            service.delete(id, &budget.month)?;
            println!("Deleted budget {} from {}", id, budget.month);
        }

        BudgetCommands::Autogen { period } => {
            let period = parse_period_arg(period.as_deref())?;
            let filter = CategoryFilter::from_settings(settings);

            let summary = Reconciler::new(&service, &filter).reconcile(&period)?;

            if summary.carried_forward > 0 {
                println!(
                    "Carried forward {} budget(s) from {}",
                    summary.carried_forward,
                    period.previous()
                );
            }
            println!("{}", summary.message());
            println!();
            print_summary(&service, &period, symbol)?;
        }

        BudgetCommands::History { count } => {
            let entries = AuditLogger::new(audit_log).read_recent(count)?;
            if entries.is_empty() {
                println!("No budget changes recorded.");
                return Ok(());
            }
            for entry in entries.iter().rev() {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

fn print_summary(service: &BudgetService<'_, Storage>, period: &Period, symbol: &str) -> BudgetResult<()> {
    let summary = service.summary(period)?;

    println!("Budget Summary: {}", period);
    println!("{}", "=".repeat(40));
    println!("{:20} {:>18}", "Total Budget:", summary.total_budget.format_with_symbol(symbol));
    println!("{:20} {:>18}", "Total Spent:", summary.total_spent.format_with_symbol(symbol));
    println!("{:20} {:>18}", "Remaining:", summary.remaining.format_with_symbol(symbol));
    println!("{:20} {:>17.1}%", "Progress:", summary.progress_percent);

    if summary.is_over_budget() {
        println!();
        println!("⚠ Over budget by {}", (-summary.remaining).format_with_symbol(symbol));
    }

    Ok(())
}

/// Parse a period argument, defaulting to the current period
///
/// Accepts "YYYY-MM" as well as "current", "last" and "next".
pub fn parse_period_arg(arg: Option<&str>) -> BudgetResult<Period> {
    let Some(arg) = arg else {
        return Ok(Period::current());
    };

    match arg.trim().to_lowercase().as_str() {
        "current" | "now" | "this" => Ok(Period::current()),
        "last" | "previous" | "prev" => Ok(Period::current().previous()),
        "next" => Ok(Period::current().next()),
        _ => Period::parse(arg.trim())
            .map_err(|_| BudgetError::Validation(format!("Invalid period format: {}", arg))),
    }
}

fn parse_amount(s: &str) -> BudgetResult<Money> {
    Money::parse(s).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

fn parse_id<T: std::str::FromStr>(s: &str, what: &str) -> BudgetResult<T> {
    s.parse()
        .map_err(|_| BudgetError::Validation(format!("Invalid {} ID: {}", what, s)))
}
