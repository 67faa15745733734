use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for categories.
///
/// The lookup column is the (unique) name; rows are created lazily by the
/// ingestion path on first use and never deleted by this crate.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[diesel(column_name = names)]
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
    pub color: Option<String>,
}
