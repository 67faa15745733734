use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Which physical ledger a transaction lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// Currency a transaction was captured in. Every stored row carries both the
/// ARS and the USD value regardless of the capture currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "ARS")]
    Ars,
    #[serde(rename = "USD")]
    Usd,
}

/// Raw row loaded from one ledger table, already shaped so downstream code
/// never branches on schema capabilities: a ledger without a `description`
/// column yields empty strings here.
#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub category_id: Option<String>,
    pub date: NaiveDate,
    pub ars: f64,
    pub usd: f64,
    pub description: String,
}

/// One entry of the reconciled transaction feed.
///
/// Assembled from a ledger row; not stored in this shape. `amount` is the USD
/// value signed by the ledger kind: negative for expenses, positive for
/// incomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub formatted_amount: String,
    pub category: String,
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub currency: Currency,
    pub description: String,
}

/// Candidate transaction for the ingestion path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub currency: Currency,
    pub description: Option<String>,
}

/// Per-category expense total straight out of the store, before color
/// enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpendRow {
    pub category: String,
    pub category_id: Option<String>,
    pub total_ars: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub items_per_page: i64,
}

/// A page of the reconciled feed plus its pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFeed {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}
