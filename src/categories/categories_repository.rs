use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;

use crate::categories::categories_model::Category;
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::db::get_connection;
use crate::errors::Result;
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl CategoryRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        CategoryRepository { pool }
    }
}

impl CategoryRepositoryTrait for CategoryRepository {
    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .select(Category::as_select())
            .order(categories::names.asc())
            .load::<Category>(&mut conn)?)
    }

    fn category_names(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .select(categories::names)
            .order(categories::names.asc())
            .load::<String>(&mut conn)?)
    }

    fn colors_by_ids(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::id.eq_any(ids))
            .select((categories::id, categories::color))
            .load::<(String, Option<String>)>(&mut conn)?;
        Ok(rows
            .into_iter()
            .filter_map(|(id, color)| color.map(|c| (id, c)))
            .collect())
    }
}
