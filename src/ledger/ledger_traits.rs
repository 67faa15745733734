use async_trait::async_trait;
use chrono::NaiveDate;

use crate::db::probe::SchemaDescriptor;
use crate::errors::Result;
use crate::fx::CurrencyPair;
use crate::ledger::ledger_filter::{CompiledFilter, TransactionFilter};
use crate::ledger::ledger_model::{
    CategorySpendRow, LedgerRow, NewTransaction, Transaction, TransactionFeed, TransactionType,
};

/// Trait for ledger repository operations
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Probe the live schema for capability flags
    fn probe_schema(&self) -> Result<SchemaDescriptor>;

    /// Count rows of one ledger under a compiled filter
    fn count(&self, kind: TransactionType, filter: &CompiledFilter) -> Result<i64>;

    /// Fetch rows of one ledger under a compiled filter (unsliced, store order)
    fn fetch(&self, kind: TransactionType, filter: &CompiledFilter) -> Result<Vec<LedgerRow>>;

    /// Insert a transaction, finding or creating its category in the same
    /// database transaction
    fn insert_transaction(
        &self,
        new: &NewTransaction,
        pair: &CurrencyPair,
        schema: &SchemaDescriptor,
    ) -> Result<Transaction>;

    /// Delete a ledger row by its stable id
    fn delete_transaction(&self, id: &str, kind: TransactionType) -> Result<usize>;

    /// Distinct category names across both ledgers (fallback source when the
    /// categories table is absent)
    fn distinct_categories(&self) -> Result<Vec<String>>;

    /// Sum of ARS values of one ledger, optionally restricted to a closed
    /// date interval
    fn sum_ars_between(
        &self,
        kind: TransactionType,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<f64>;

    /// All-time (ARS, USD) totals of one ledger
    fn sum_totals(&self, kind: TransactionType) -> Result<(f64, f64)>;

    /// Expense totals grouped by category over an optional date window
    fn spending_by_category(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<CategorySpendRow>>;

    /// Most recent entries of one ledger for the dashboard widgets
    fn latest(
        &self,
        kind: TransactionType,
        limit: i64,
        schema: &SchemaDescriptor,
    ) -> Result<Vec<LedgerRow>>;
}

/// Trait for the transaction feed / ingestion service
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Reconciled, filtered, paginated feed over both ledgers
    async fn search_transactions(
        &self,
        filter: TransactionFilter,
        page: i64,
        page_size: i64,
    ) -> Result<TransactionFeed>;

    /// Validate and persist a candidate transaction
    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction>;

    /// Delete a transaction by stable id and ledger kind
    async fn delete_transaction(&self, id: &str, kind: TransactionType) -> Result<()>;
}
