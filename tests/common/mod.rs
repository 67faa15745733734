#![allow(dead_code)]

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use tempfile::TempDir;

use cashfolio_core::categories::{CategoryRepository, CategoryService};
use cashfolio_core::db::{self, DbPool};
use cashfolio_core::events::ChannelViewNotifier;
use cashfolio_core::fx::FixedRateProvider;
use cashfolio_core::ledger::{LedgerRepository, TransactionService};
use cashfolio_core::summary::SummaryService;

/// A pooled database living in a temp directory for the duration of a test.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

/// Database created through the crate's own migrations: full schema.
pub fn migrated_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    TestDb { pool, _dir: dir }
}

/// Database shaped like an older deployment: real ledgers, but no categories
/// table and no description columns.
pub fn legacy_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");

    let mut conn = pool.get().expect("Failed to get database connection");
    conn.batch_execute(
        "CREATE TABLE incomes (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            category_id TEXT,
            date DATE NOT NULL,
            ars DOUBLE NOT NULL DEFAULT 0,
            usd DOUBLE NOT NULL DEFAULT 0
        );
        CREATE TABLE expenses (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            category_id TEXT,
            date DATE NOT NULL,
            ars DOUBLE NOT NULL DEFAULT 0,
            usd DOUBLE NOT NULL DEFAULT 0
        );",
    )
    .expect("Failed to create legacy tables");

    TestDb { pool, _dir: dir }
}

pub struct TestServices {
    pub transactions: TransactionService,
    pub categories: CategoryService,
    pub summary: SummaryService,
    pub notifier: Arc<ChannelViewNotifier>,
}

pub fn services(db: &TestDb) -> TestServices {
    let ledger_repo = Arc::new(LedgerRepository::new(db.pool.clone()));
    let category_repo = Arc::new(CategoryRepository::new(db.pool.clone()));
    let notifier = Arc::new(ChannelViewNotifier::new(16));

    TestServices {
        transactions: TransactionService::new(
            ledger_repo.clone(),
            category_repo.clone(),
            Arc::new(FixedRateProvider),
            notifier.clone(),
        ),
        categories: CategoryService::new(category_repo.clone(), ledger_repo.clone()),
        summary: SummaryService::new(ledger_repo, category_repo),
        notifier,
    }
}
