pub mod summary_model;
pub mod summary_service;

pub use summary_model::{DashboardSummary, FinancialTotals, LatestEntry, SpendingByCategory};
pub use summary_service::{SummaryService, SummaryServiceTrait};
