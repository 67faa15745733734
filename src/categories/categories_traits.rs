use std::collections::HashMap;

use crate::categories::categories_model::Category;
use crate::errors::Result;

/// Trait for category repository operations
pub trait CategoryRepositoryTrait: Send + Sync {
    /// All category rows ordered by name
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Category names ordered by name
    fn category_names(&self) -> Result<Vec<String>>;

    /// Batched color lookup for a distinct id set; ids without a stored
    /// color are absent from the result
    fn colors_by_ids(&self, ids: &[String]) -> Result<HashMap<String, String>>;
}

/// Trait for category service operations
pub trait CategoryServiceTrait: Send + Sync {
    /// Full category rows; empty when the categories table is absent
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Category names for filter dropdowns, with the ledger-derived fallback
    /// and the fixed default set when the store holds none
    fn list_category_names(&self) -> Result<Vec<String>>;
}
