use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, error};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::constants::LATEST_ENTRIES_LIMIT;
use crate::errors::{Result, ValidationError};
use crate::fx::CurrencyPair;
use crate::ledger::ledger_model::{LedgerRow, TransactionType};
use crate::ledger::ledger_traits::LedgerRepositoryTrait;
use crate::summary::summary_model::{
    DashboardSummary, FinancialTotals, LatestEntry, SpendingByCategory,
};

/// Trait defining the contract for the summary service
pub trait SummaryServiceTrait: Send + Sync {
    fn get_dashboard_summary(&self) -> Result<DashboardSummary>;
    fn get_spending_by_category(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<SpendingByCategory>>;
    fn financial_totals(&self) -> Result<FinancialTotals>;
    fn latest_incomes(&self) -> Result<Vec<LatestEntry>>;
    fn latest_expenses(&self) -> Result<Vec<LatestEntry>>;
}

pub struct SummaryService {
    ledger_repo: Arc<dyn LedgerRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl SummaryService {
    pub fn new(
        ledger_repo: Arc<dyn LedgerRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        SummaryService {
            ledger_repo,
            category_repo,
        }
    }

    fn latest(&self, kind: TransactionType) -> Result<Vec<LatestEntry>> {
        let schema = self.ledger_repo.probe_schema()?;
        let rows = self
            .ledger_repo
            .latest(kind, LATEST_ENTRIES_LIMIT, &schema)?;
        Ok(rows.into_iter().map(LatestEntry::from).collect())
    }
}

impl From<LedgerRow> for LatestEntry {
    fn from(row: LedgerRow) -> Self {
        LatestEntry {
            formatted_amount: format!("${:.2}", row.usd),
            name: row.name,
            category: row.category,
            amount: row.usd,
            date: row.date,
        }
    }
}

/// First and last day of the month containing `date`.
fn month_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let (year, month) = (date.year(), date.month());
    let start = NaiveDate::from_ymd_opt(year, month, 1);
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (start, next_month_start.and_then(|d| d.pred_opt())) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(ValidationError::InvalidInput(format!("invalid month for date {}", date)).into()),
    }
}

/// The month preceding the one containing `date`.
fn previous_month_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(anchor) => month_bounds(anchor),
        None => {
            Err(ValidationError::InvalidInput(format!("invalid month for date {}", date)).into())
        }
    }
}

/// Month-over-month delta in whole percent. A zero prior period is a defined
/// edge case, not an error: the caller picks what it reads as.
fn change_percent(current: f64, previous: f64, zero_prior_value: f64) -> f64 {
    if previous == 0.0 {
        zero_prior_value
    } else {
        ((current - previous) / previous * 100.0).round()
    }
}

impl SummaryServiceTrait for SummaryService {
    fn get_dashboard_summary(&self) -> Result<DashboardSummary> {
        debug!("Computing dashboard summary");
        let today = Utc::now().date_naive();
        let current = month_bounds(today)?;
        let previous = previous_month_bounds(today)?;

        let income_this_month = self
            .ledger_repo
            .sum_ars_between(TransactionType::Income, Some(current))?;
        let expenses_this_month = self
            .ledger_repo
            .sum_ars_between(TransactionType::Expense, Some(current))?;
        let prior_income = self
            .ledger_repo
            .sum_ars_between(TransactionType::Income, Some(previous))?;
        let prior_expenses = self
            .ledger_repo
            .sum_ars_between(TransactionType::Expense, Some(previous))?;

        let total_income = self
            .ledger_repo
            .sum_ars_between(TransactionType::Income, None)?;
        let total_expenses = self
            .ledger_repo
            .sum_ars_between(TransactionType::Expense, None)?;

        Ok(DashboardSummary {
            current_balance: total_income - total_expenses,
            income_this_month,
            expenses_this_month,
            income_change_percent: change_percent(income_this_month, prior_income, 100.0),
            expenses_change_percent: change_percent(expenses_this_month, prior_expenses, 0.0),
        })
    }

    fn get_spending_by_category(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<SpendingByCategory>> {
        let range = match (start, end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };

        let mut rows = self.ledger_repo.spending_by_category(range)?;
        rows.sort_by(|a, b| {
            b.total_ars
                .partial_cmp(&a.total_ars)
                .unwrap_or(Ordering::Equal)
        });

        // Color annotation is best-effort, like the feed enrichment.
        let schema = self.ledger_repo.probe_schema()?;
        let colors: HashMap<String, String> = if schema.has_categories_table {
            let ids: Vec<String> = rows
                .iter()
                .filter_map(|r| r.category_id.clone())
                .collect::<HashSet<_>>()
                .into_iter()
                .collect();
            match self.category_repo.colors_by_ids(&ids) {
                Ok(colors) => colors,
                Err(e) => {
                    error!("Category color lookup failed, skipping annotation: {}", e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(rows
            .into_iter()
            .map(|row| SpendingByCategory {
                color: row
                    .category_id
                    .as_ref()
                    .and_then(|id| colors.get(id).cloned()),
                category: row.category,
                amount: row.total_ars,
            })
            .collect())
    }

    fn financial_totals(&self) -> Result<FinancialTotals> {
        let (income_ars, income_usd) = self.ledger_repo.sum_totals(TransactionType::Income)?;
        let (expense_ars, expense_usd) = self.ledger_repo.sum_totals(TransactionType::Expense)?;
        Ok(FinancialTotals {
            income: CurrencyPair {
                ars: income_ars,
                usd: income_usd,
            },
            expenses: CurrencyPair {
                ars: expense_ars,
                usd: expense_usd,
            },
        })
    }

    fn latest_incomes(&self) -> Result<Vec<LatestEntry>> {
        self.latest(TransactionType::Income)
    }

    fn latest_expenses(&self) -> Result<Vec<LatestEntry>> {
        self.latest(TransactionType::Expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_percent_uses_the_zero_prior_value() {
        assert_eq!(change_percent(500.0, 0.0, 100.0), 100.0);
        assert_eq!(change_percent(500.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn change_percent_rounds_to_whole_percent() {
        assert_eq!(change_percent(150.0, 100.0, 100.0), 50.0);
        assert_eq!(change_percent(100.0, 300.0, 100.0), -67.0);
    }

    #[test]
    fn month_bounds_are_inclusive() {
        let (start, end) = month_bounds(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn previous_month_wraps_over_january() {
        let (start, end) =
            previous_month_bounds(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }
}
