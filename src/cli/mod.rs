//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;

pub use budget::{handle_budget_command, parse_period_arg, BudgetCommands};
