pub mod ledger_errors;
pub mod ledger_filter;
pub mod ledger_merge;
pub mod ledger_model;
pub mod ledger_repository;
pub mod ledger_service;
pub mod ledger_traits;

pub use ledger_errors::LedgerError;
pub use ledger_filter::{CompiledFilter, TransactionFilter};
pub use ledger_model::{
    Currency, LedgerRow, NewTransaction, Pagination, Transaction, TransactionFeed,
    TransactionType,
};
pub use ledger_repository::LedgerRepository;
pub use ledger_service::TransactionService;
pub use ledger_traits::{LedgerRepositoryTrait, TransactionServiceTrait};
