//! Auto-generation eligibility
//!
//! Only expense categories get seeded budgets, and administrative ones
//! (reimbursements, transfers, balance adjustments) are left out by name.

use crate::config::Settings;
use crate::models::Category;

/// Decides which categories may receive an auto-generated budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    exclusions: Vec<String>,
}

impl CategoryFilter {
    /// Build a filter from name fragments to exclude
    pub fn new<I, S>(exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclusions: exclusions.into_iter().map(Into::into).collect(),
        }
    }

    /// Filter using the exclusion list from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.excluded_category_patterns.iter().cloned())
    }

    /// An expense category whose name contains no exclusion fragment
    ///
    /// Matching is a case-sensitive substring test, so "Reimbursement"
    /// also excludes "Reimbursement [G]".
    pub fn is_eligible(&self, category: &Category) -> bool {
        category.is_expense()
            && !self
                .exclusions
                .iter()
                .any(|excluded| category.name.contains(excluded.as_str()))
    }

    /// Eligible categories, in input order
    pub fn eligible<'c>(&self, categories: &'c [Category]) -> Vec<&'c Category> {
        categories.iter().filter(|c| self.is_eligible(c)).collect()
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
