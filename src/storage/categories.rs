//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json. File order is
//! kept because auto-generation walks categories in list order.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    #[serde(default)]
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *categories = file_data.categories;

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = CategoryData {
            categories: categories.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by id
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, BudgetError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    /// Get all categories in list order
    pub fn get_all(&self) -> Result<Vec<Category>, BudgetError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.clone())
    }

    /// Insert a category, or replace the one with the same id in place
    pub fn upsert(&self, category: Category) -> Result<(), BudgetError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => categories.push(category),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryType;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_keeps_list_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(Category::expense(3, "Rent")).unwrap();
        repo.upsert(Category::expense(1, "Groceries")).unwrap();
        repo.upsert(Category::new(
            CategoryId::new(3),
            "Housing",
            CategoryType::Expense,
        ))
        .unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Housing", "Groceries"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.upsert(Category::expense(1, "Groceries")).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();
        assert_eq!(
            repo2.get(CategoryId::new(1)).unwrap(),
            Some(Category::expense(1, "Groceries"))
        );
    }
}
