use log::debug;
use std::sync::Arc;

use crate::categories::categories_model::Category;
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::constants::DEFAULT_CATEGORIES;
use crate::errors::Result;
use crate::ledger::ledger_traits::LedgerRepositoryTrait;

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    ledger_repo: Arc<dyn LedgerRepositoryTrait>,
}

impl CategoryService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        ledger_repo: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        CategoryService {
            category_repo,
            ledger_repo,
        }
    }
}

impl CategoryServiceTrait for CategoryService {
    fn list_categories(&self) -> Result<Vec<Category>> {
        let schema = self.ledger_repo.probe_schema()?;
        if !schema.has_categories_table {
            return Ok(Vec::new());
        }
        self.category_repo.list_categories()
    }

    fn list_category_names(&self) -> Result<Vec<String>> {
        let schema = self.ledger_repo.probe_schema()?;

        let mut names = if schema.has_categories_table {
            self.category_repo.category_names()?
        } else {
            debug!("Categories table absent, deriving names from both ledgers");
            self.ledger_repo.distinct_categories()?
        };

        names.retain(|n| !n.is_empty());
        names.sort();
        names.dedup();

        // The fixed default set is only offered when the store holds no
        // category names at all, in its canonical (unsorted) order.
        if names.is_empty() && !schema.has_categories_table {
            names = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();
        }

        Ok(names)
    }
}
