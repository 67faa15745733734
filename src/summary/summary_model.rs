use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fx::CurrencyPair;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub current_balance: f64,
    pub income_this_month: f64,
    pub expenses_this_month: f64,
    pub income_change_percent: f64,
    pub expenses_change_percent: f64,
}

/// One slice of the spending-by-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingByCategory {
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// All-time totals per ledger, in both stored currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTotals {
    pub income: CurrencyPair,
    pub expenses: CurrencyPair,
}

/// Entry of the "latest incomes/expenses" dashboard widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestEntry {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub formatted_amount: String,
    pub date: NaiveDate,
}
