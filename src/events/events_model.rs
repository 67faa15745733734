use serde::{Deserialize, Serialize};

use crate::ledger::ledger_model::TransactionType;

/// Invalidation event published after a successful write so collaborators
/// holding aggregate views (feed pages, dashboard cards) can refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ViewEvent {
    TransactionsChanged { kind: TransactionType },
}
