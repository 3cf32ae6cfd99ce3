//! User settings
//!
//! Persisted as config.json in the base directory. Missing fields fall back
//! to their defaults so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::ReconcilerPaths;
use crate::error::BudgetError;

/// Category-name fragments that mark administrative categories
///
/// Such categories never receive an auto-generated budget.
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &[
    "Reimbursement",
    "Reimbursement [G]",
    "Reimbursement [U]",
    "Reimbursement [E]",
    "Transfer",
    "Adjust",
];

/// User settings for the budget reconciler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Substrings excluding a category from auto-generation (case-sensitive)
    #[serde(default = "default_excluded_patterns")]
    pub excluded_category_patterns: Vec<String>,

    /// Whether budget writes are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Currency symbol used by the CLI
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_excluded_patterns() -> Vec<String> {
    DEFAULT_EXCLUDED_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_audit_enabled() -> bool {
    true
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            excluded_category_patterns: default_excluded_patterns(),
            audit_enabled: default_audit_enabled(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ReconcilerPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReconcilerPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
