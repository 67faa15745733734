use thiserror::Error;

/// Custom error type for ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    #[error("Not found: {0}")]
    NotFound(String),
}
