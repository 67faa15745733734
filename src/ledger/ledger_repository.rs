use diesel::dsl::{count_star, sum};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::{Bool, Text};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::db::probe::SchemaDescriptor;
use crate::errors::{Error, Result};
use crate::fx::CurrencyPair;
use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_filter::CompiledFilter;
use crate::ledger::ledger_merge::format_amount;
use crate::ledger::ledger_model::{
    CategorySpendRow, LedgerRow, NewTransaction, Transaction, TransactionType,
};
use crate::ledger::ledger_traits::LedgerRepositoryTrait;
use crate::schema::{categories, expenses, incomes};

/// Applies one compiled filter to either ledger table. Both tables share the
/// same column names, so the predicate template is identical per ledger kind;
/// only the `description` clause depends on the probed capability because the
/// column may not exist physically.
macro_rules! filtered_ledger {
    ($table:ident, $select:expr, $filter:expr, $search_description:expr) => {{
        let mut query = $table::table.select($select).into_boxed();
        if let Some((start, end)) = $filter.date_range {
            query = query
                .filter($table::date.ge(start))
                .filter($table::date.le(end));
        }
        if let Some(ref category) = $filter.category {
            query = query.filter($table::category.eq(category.clone()));
        }
        if let Some(ref pattern) = $filter.search_pattern {
            if $search_description {
                query = query.filter(
                    $table::name.like(pattern.clone()).or(diesel::dsl::sql::<Bool>(
                        "description LIKE ",
                    )
                    .bind::<Text, _>(pattern.clone())),
                );
            } else {
                query = query.filter($table::name.like(pattern.clone()));
            }
        }
        query
    }};
}

/// SELECT list shared by all row fetches. Ledgers without a `description`
/// column get an empty-string placeholder so `LedgerRow` never branches on
/// schema capabilities downstream.
macro_rules! ledger_row_select {
    ($table:ident, $has_description:expr) => {
        (
            $table::id,
            $table::name,
            $table::category,
            $table::category_id,
            $table::date,
            $table::ars,
            $table::usd,
            diesel::dsl::sql::<Text>(if $has_description {
                "COALESCE(description, '')"
            } else {
                "''"
            }),
        )
    };
}

/// Repository for the two physical ledgers (incomes, expenses) and the
/// transactional ingestion path.
pub struct LedgerRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl LedgerRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl LedgerRepositoryTrait for LedgerRepository {
    fn probe_schema(&self) -> Result<SchemaDescriptor> {
        let mut conn = get_connection(&self.pool)?;
        SchemaDescriptor::probe(&mut conn)
    }

    fn count(&self, kind: TransactionType, filter: &CompiledFilter) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = match kind {
            TransactionType::Income => {
                filtered_ledger!(incomes, count_star(), filter, filter.search_description(kind))
                    .first::<i64>(&mut conn)?
            }
            TransactionType::Expense => {
                filtered_ledger!(expenses, count_star(), filter, filter.search_description(kind))
                    .first::<i64>(&mut conn)?
            }
        };
        Ok(total)
    }

    fn fetch(&self, kind: TransactionType, filter: &CompiledFilter) -> Result<Vec<LedgerRow>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = match kind {
            TransactionType::Income => filtered_ledger!(
                incomes,
                ledger_row_select!(incomes, filter.include_description(kind)),
                filter,
                filter.search_description(kind)
            )
            .load::<LedgerRow>(&mut conn)?,
            TransactionType::Expense => filtered_ledger!(
                expenses,
                ledger_row_select!(expenses, filter.include_description(kind)),
                filter,
                filter.search_description(kind)
            )
            .load::<LedgerRow>(&mut conn)?,
        };
        Ok(rows)
    }

    fn insert_transaction(
        &self,
        new: &NewTransaction,
        pair: &CurrencyPair,
        schema: &SchemaDescriptor,
    ) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        conn.immediate_transaction::<Transaction, Error, _>(|conn| {
            // Find-or-create runs inside the same transaction as the ledger
            // insert; UNIQUE(names) makes concurrent creators collide instead
            // of duplicating rows.
            let category_id = if schema.has_categories_table {
                let existing = categories::table
                    .filter(categories::names.eq(&new.category))
                    .select(categories::id)
                    .first::<String>(conn)
                    .optional()?;
                Some(match existing {
                    Some(id) => id,
                    None => {
                        let cat_id =
                            format!("cat_{}", &Uuid::new_v4().simple().to_string()[..12]);
                        diesel::insert_into(categories::table)
                            .values((
                                categories::id.eq(&cat_id),
                                categories::names.eq(&new.category),
                                categories::category_type.eq(new.transaction_type.as_str()),
                            ))
                            .execute(conn)?;
                        cat_id
                    }
                })
            } else {
                None
            };

            let row_id = Uuid::new_v4().to_string();
            let include_description =
                schema.has_description(new.transaction_type) && new.description.is_some();

            macro_rules! insert_ledger_row {
                ($table:ident) => {
                    if include_description {
                        diesel::insert_into($table::table)
                            .values((
                                $table::id.eq(&row_id),
                                $table::name.eq(&new.name),
                                $table::category.eq(&new.category),
                                $table::category_id.eq(category_id.as_deref()),
                                $table::date.eq(new.date),
                                $table::ars.eq(pair.ars),
                                $table::usd.eq(pair.usd),
                                $table::description.eq(new.description.as_deref()),
                            ))
                            .execute(conn)?
                    } else {
                        diesel::insert_into($table::table)
                            .values((
                                $table::id.eq(&row_id),
                                $table::name.eq(&new.name),
                                $table::category.eq(&new.category),
                                $table::category_id.eq(category_id.as_deref()),
                                $table::date.eq(new.date),
                                $table::ars.eq(pair.ars),
                                $table::usd.eq(pair.usd),
                            ))
                            .execute(conn)?
                    }
                };
            }

            match new.transaction_type {
                TransactionType::Income => insert_ledger_row!(incomes),
                TransactionType::Expense => insert_ledger_row!(expenses),
            };

            let amount = match new.transaction_type {
                TransactionType::Income => pair.usd,
                TransactionType::Expense => -pair.usd,
            };

            Ok(Transaction {
                id: row_id,
                name: new.name.clone(),
                amount,
                formatted_amount: format_amount(pair.usd, new.transaction_type),
                category: new.category.clone(),
                category_id,
                category_color: None,
                date: new.date,
                transaction_type: new.transaction_type,
                currency: new.currency,
                description: new.description.clone().unwrap_or_default(),
            })
        })
    }

    fn delete_transaction(&self, id: &str, kind: TransactionType) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let deleted = match kind {
            TransactionType::Income => {
                diesel::delete(incomes::table.find(id)).execute(&mut conn)?
            }
            TransactionType::Expense => {
                diesel::delete(expenses::table.find(id)).execute(&mut conn)?
            }
        };
        if deleted == 0 {
            return Err(LedgerError::NotFound(format!(
                "No {} transaction with id {}",
                kind.as_str(),
                id
            ))
            .into());
        }
        Ok(deleted)
    }

    fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let mut names = incomes::table
            .select(incomes::category)
            .distinct()
            .load::<String>(&mut conn)?;
        names.extend(
            expenses::table
                .select(expenses::category)
                .distinct()
                .load::<String>(&mut conn)?,
        );
        Ok(names)
    }

    fn sum_ars_between(
        &self,
        kind: TransactionType,
        range: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    ) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;
        let total: Option<f64> = match kind {
            TransactionType::Income => {
                let mut query = incomes::table.select(sum(incomes::ars)).into_boxed();
                if let Some((start, end)) = range {
                    query = query
                        .filter(incomes::date.ge(start))
                        .filter(incomes::date.le(end));
                }
                query.first(&mut conn)?
            }
            TransactionType::Expense => {
                let mut query = expenses::table.select(sum(expenses::ars)).into_boxed();
                if let Some((start, end)) = range {
                    query = query
                        .filter(expenses::date.ge(start))
                        .filter(expenses::date.le(end));
                }
                query.first(&mut conn)?
            }
        };
        Ok(total.unwrap_or(0.0))
    }

    fn sum_totals(&self, kind: TransactionType) -> Result<(f64, f64)> {
        let mut conn = get_connection(&self.pool)?;
        let (ars, usd): (Option<f64>, Option<f64>) = match kind {
            TransactionType::Income => incomes::table
                .select((sum(incomes::ars), sum(incomes::usd)))
                .first(&mut conn)?,
            TransactionType::Expense => expenses::table
                .select((sum(expenses::ars), sum(expenses::usd)))
                .first(&mut conn)?,
        };
        Ok((ars.unwrap_or(0.0), usd.unwrap_or(0.0)))
    }

    fn spending_by_category(
        &self,
        range: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    ) -> Result<Vec<CategorySpendRow>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = expenses::table
            .group_by((expenses::category, expenses::category_id))
            .select((expenses::category, expenses::category_id, sum(expenses::ars)))
            .into_boxed();
        if let Some((start, end)) = range {
            query = query
                .filter(expenses::date.ge(start))
                .filter(expenses::date.le(end));
        }
        let rows = query.load::<(String, Option<String>, Option<f64>)>(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(|(category, category_id, total_ars)| CategorySpendRow {
                category,
                category_id,
                total_ars: total_ars.unwrap_or(0.0),
            })
            .collect())
    }

    fn latest(
        &self,
        kind: TransactionType,
        limit: i64,
        schema: &SchemaDescriptor,
    ) -> Result<Vec<LedgerRow>> {
        let mut conn = get_connection(&self.pool)?;
        // Incomes are "latest" by date; expenses keep the original dashboard
        // semantics of "largest first".
        let rows = match kind {
            TransactionType::Income => incomes::table
                .select(ledger_row_select!(incomes, schema.has_description(kind)))
                .order(incomes::date.desc())
                .limit(limit)
                .load::<LedgerRow>(&mut conn)?,
            TransactionType::Expense => expenses::table
                .select(ledger_row_select!(expenses, schema.has_description(kind)))
                .order(expenses::usd.desc())
                .limit(limit)
                .load::<LedgerRow>(&mut conn)?,
        };
        Ok(rows)
    }
}
