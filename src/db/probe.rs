use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;

use crate::errors::Result;
use crate::ledger::ledger_model::TransactionType;

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

/// Capability flags learned from the live database.
///
/// The three tables are created by this crate's migrations, but the core can
/// also be pointed at a ledger database produced by an older deployment where
/// the `categories` table or the `description` columns do not exist yet.
/// Probed once per request and threaded through filter compilation, reads and
/// writes; a missing table or column is a normal answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub has_categories_table: bool,
    pub incomes_has_description: bool,
    pub expenses_has_description: bool,
}

impl SchemaDescriptor {
    pub fn probe(conn: &mut SqliteConnection) -> Result<Self> {
        Ok(SchemaDescriptor {
            has_categories_table: table_exists(conn, "categories")?,
            incomes_has_description: column_exists(conn, "incomes", "description")?,
            expenses_has_description: column_exists(conn, "expenses", "description")?,
        })
    }

    /// Whether the ledger holding `kind` supports the `description` column.
    pub fn has_description(&self, kind: TransactionType) -> bool {
        match kind {
            TransactionType::Income => self.incomes_has_description,
            TransactionType::Expense => self.expenses_has_description,
        }
    }
}

pub fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool> {
    let row: CountRow = diesel::sql_query(
        "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind::<Text, _>(table)
    .get_result(conn)?;
    Ok(row.n > 0)
}

pub fn column_exists(conn: &mut SqliteConnection, table: &str, column: &str) -> Result<bool> {
    let row: CountRow =
        diesel::sql_query("SELECT COUNT(*) AS n FROM pragma_table_info(?) WHERE name = ?")
            .bind::<Text, _>(table)
            .bind::<Text, _>(column)
            .get_result(conn)?;
    Ok(row.n > 0)
}
