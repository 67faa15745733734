use async_trait::async_trait;
use log::{debug, error};
use std::collections::HashSet;
use std::sync::Arc;

use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::events::{ViewEvent, ViewNotifierTrait};
use crate::fx::{currency_pair, RateProviderTrait};
use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_filter::TransactionFilter;
use crate::ledger::ledger_merge::{merge_transactions, page_slice, paginate, shape_rows};
use crate::ledger::ledger_model::{
    LedgerRow, NewTransaction, Transaction, TransactionFeed, TransactionType,
};
use crate::ledger::ledger_traits::{LedgerRepositoryTrait, TransactionServiceTrait};

/// Orchestrates the reconciled feed: schema probe, filter compilation, the
/// two-ledger fan-out, merge/paginate and best-effort color enrichment, plus
/// the transactional ingestion path.
pub struct TransactionService {
    ledger_repo: Arc<dyn LedgerRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    rate_provider: Arc<dyn RateProviderTrait>,
    notifier: Arc<dyn ViewNotifierTrait>,
}

impl TransactionService {
    pub fn new(
        ledger_repo: Arc<dyn LedgerRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        rate_provider: Arc<dyn RateProviderTrait>,
        notifier: Arc<dyn ViewNotifierTrait>,
    ) -> Self {
        TransactionService {
            ledger_repo,
            category_repo,
            rate_provider,
            notifier,
        }
    }

    fn validate(new: &NewTransaction) -> Result<()> {
        if new.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if !(new.amount > 0.0) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "amount must be greater than zero".to_string(),
            )));
        }
        if new.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        Ok(())
    }

    /// Best-effort enrichment: one batched color lookup keyed by the distinct
    /// category ids present on this page. Never fails the read.
    async fn resolve_category_colors(&self, page_items: &mut [Transaction]) {
        let distinct: Vec<String> = page_items
            .iter()
            .filter_map(|t| t.category_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if distinct.is_empty() {
            return;
        }

        let repo = self.category_repo.clone();
        let colors = match tokio::task::spawn_blocking(move || repo.colors_by_ids(&distinct)).await
        {
            Ok(Ok(colors)) => colors,
            Ok(Err(e)) => {
                error!("Category color lookup failed, skipping enrichment: {}", e);
                return;
            }
            Err(e) => {
                error!("Category color task failed, skipping enrichment: {}", e);
                return;
            }
        };

        for item in page_items.iter_mut() {
            if let Some(ref id) = item.category_id {
                item.category_color = colors.get(id).cloned();
            }
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> Error {
    LedgerError::FetchFailed(format!("background read task failed: {}", e)).into()
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn search_transactions(
        &self,
        filter: TransactionFilter,
        page: i64,
        page_size: i64,
    ) -> Result<TransactionFeed> {
        debug!(
            "Searching transactions, page {} (page size {})",
            page, page_size
        );

        if page_size <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "page size must be greater than zero, got {}",
                page_size
            ))));
        }

        let repo = self.ledger_repo.clone();
        let schema = tokio::task::spawn_blocking(move || repo.probe_schema())
            .await
            .map_err(join_error)??;
        let compiled = Arc::new(filter.compile(&schema));

        // Count fan-out; either both ledgers answer or the read fails.
        let (income_count, expense_count) = {
            let (repo_a, filter_a) = (self.ledger_repo.clone(), compiled.clone());
            let (repo_b, filter_b) = (self.ledger_repo.clone(), compiled.clone());
            let (a, b) = tokio::try_join!(
                tokio::task::spawn_blocking(move || repo_a
                    .count(TransactionType::Income, &filter_a)),
                tokio::task::spawn_blocking(move || repo_b
                    .count(TransactionType::Expense, &filter_b)),
            )
            .map_err(join_error)?;
            (a?, b?)
        };

        let total_items = income_count + expense_count;
        let pagination = paginate(total_items, page, page_size);

        if total_items == 0 {
            return Ok(TransactionFeed {
                transactions: Vec::new(),
                pagination,
            });
        }

        // Row fan-out under the identical compiled predicate.
        let (income_rows, expense_rows): (Vec<LedgerRow>, Vec<LedgerRow>) = {
            let (repo_a, filter_a) = (self.ledger_repo.clone(), compiled.clone());
            let (repo_b, filter_b) = (self.ledger_repo.clone(), compiled.clone());
            let (a, b) = tokio::try_join!(
                tokio::task::spawn_blocking(move || repo_a
                    .fetch(TransactionType::Income, &filter_a)),
                tokio::task::spawn_blocking(move || repo_b
                    .fetch(TransactionType::Expense, &filter_b)),
            )
            .map_err(join_error)?;
            (a?, b?)
        };

        let merged = merge_transactions(
            shape_rows(income_rows, TransactionType::Income),
            shape_rows(expense_rows, TransactionType::Expense),
        );
        let mut page_items = page_slice(merged, page, page_size);

        if schema.has_categories_table {
            self.resolve_category_colors(&mut page_items).await;
        }

        Ok(TransactionFeed {
            transactions: page_items,
            pagination,
        })
    }

    async fn create_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        Self::validate(&new)?;

        let pair = currency_pair(new.amount, new.currency, self.rate_provider.as_ref())?;

        let repo = self.ledger_repo.clone();
        let created = tokio::task::spawn_blocking(move || {
            let schema = repo.probe_schema()?;
            repo.insert_transaction(&new, &pair, &schema)
        })
        .await
        .map_err(join_error)??;

        debug!(
            "Created {} transaction {}",
            created.transaction_type.as_str(),
            created.id
        );
        self.notifier.notify(ViewEvent::TransactionsChanged {
            kind: created.transaction_type,
        });

        Ok(created)
    }

    async fn delete_transaction(&self, id: &str, kind: TransactionType) -> Result<()> {
        let repo = self.ledger_repo.clone();
        let id_owned = id.to_string();
        tokio::task::spawn_blocking(move || repo.delete_transaction(&id_owned, kind))
            .await
            .map_err(join_error)??;

        self.notifier.notify(ViewEvent::TransactionsChanged { kind });
        Ok(())
    }
}
