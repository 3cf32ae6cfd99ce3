//! Audit entry data structures
//!
//! One entry per budget write, with the budget's state before and after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Budget, BudgetId, Period};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// What caused a budget write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteOrigin {
    /// Direct user action
    #[default]
    Manual,
    /// Copied from the previous period by auto-generation
    CarryForward,
    /// Seeded from the previous period's spend by auto-generation
    SpendSeeded,
}

impl std::fmt::Display for WriteOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOrigin::Manual => write!(f, "manual"),
            WriteOrigin::CarryForward => write!(f, "carry-forward"),
            WriteOrigin::SpendSeeded => write!(f, "spend-seeded"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub budget_id: BudgetId,

    pub period: Period,

    #[serde(default)]
    pub origin: WriteOrigin,

    /// The budget before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The budget after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable change summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, budget: &Budget, origin: WriteOrigin) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            budget_id: budget.id,
            period: budget.month,
            origin,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created budget
    pub fn create(budget: &Budget, origin: WriteOrigin) -> Self {
        Self {
            after: serde_json::to_value(budget).ok(),
            ..Self::new(Operation::Create, budget, origin)
        }
    }

    /// Entry for an edited budget; the summary lists changed fields
    pub fn update(before: &Budget, after: &Budget) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary: summarize_changes(before, after),
            ..Self::new(Operation::Update, after, WriteOrigin::Manual)
        }
    }

    /// Entry for a deleted budget
    pub fn delete(budget: &Budget) -> Self {
        Self {
            before: serde_json::to_value(budget).ok(),
            ..Self::new(Operation::Delete, budget, WriteOrigin::Manual)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} Budget {} ({}, {})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.budget_id,
            self.period,
            self.origin
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

fn summarize_changes(before: &Budget, after: &Budget) -> Option<String> {
    let mut changes = Vec::new();

    if before.category_id != after.category_id {
        changes.push(format!(
            "category: {} -> {}",
            before.category_id, after.category_id
        ));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.notes != after.notes {
        changes.push(format!(
            "notes: {:?} -> {:?}",
            before.notes.as_deref().unwrap_or(""),
            after.notes.as_deref().unwrap_or("")
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, NewBudget};

    fn budget() -> Budget {
        NewBudget::new(
            CategoryId::new(3),
            Money::from_cents(10000),
            Period::new(2025, 2).unwrap(),
        )
        .into_budget(BudgetId::new(8))
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(&budget(), WriteOrigin::CarryForward);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.budget_id, BudgetId::new(8));
        assert_eq!(entry.origin, WriteOrigin::CarryForward);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry_summarizes_changes() {
        let before = budget();
        let mut after = before.clone();
        after.amount = Money::from_cents(12500);
        after.notes = Some("raised".into());

        let entry = AuditEntry::update(&before, &after);

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("amount: $100.00 -> $125.00, notes: \"\" -> \"raised\"")
        );
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&budget());

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let formatted = AuditEntry::create(&budget(), WriteOrigin::SpendSeeded).format_human_readable();
        assert!(formatted.contains("CREATE Budget 8"));
        assert!(formatted.contains("2025-02"));
        assert!(formatted.contains("spend-seeded"));
    }
}
