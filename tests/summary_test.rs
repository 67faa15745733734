use chrono::{Datelike, NaiveDate, Utc};

use cashfolio_core::ledger::{
    Currency, NewTransaction, TransactionServiceTrait, TransactionType,
};
use cashfolio_core::summary::SummaryServiceTrait;

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn first_of_current_month() -> NaiveDate {
    let today = Utc::now().date_naive();
    date(today.year(), today.month(), 1)
}

fn first_of_previous_month() -> NaiveDate {
    let today = Utc::now().date_naive();
    if today.month() == 1 {
        date(today.year() - 1, 12, 1)
    } else {
        date(today.year(), today.month() - 1, 1)
    }
}

async fn create(
    services: &common::TestServices,
    name: &str,
    ars_amount: f64,
    category: &str,
    on: NaiveDate,
    kind: TransactionType,
) {
    services
        .transactions
        .create_transaction(NewTransaction {
            name: name.to_string(),
            amount: ars_amount,
            category: category.to_string(),
            date: on,
            transaction_type: kind,
            currency: Currency::Ars,
            description: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn dashboard_with_an_empty_prior_month() {
    let db = common::migrated_db();
    let services = common::services(&db);
    let this_month = first_of_current_month();

    create(
        &services,
        "Salary",
        100_000.0,
        "Salary",
        this_month,
        TransactionType::Income,
    )
    .await;
    create(
        &services,
        "Groceries",
        40_000.0,
        "Food",
        this_month,
        TransactionType::Expense,
    )
    .await;

    let summary = services.summary.get_dashboard_summary().unwrap();
    assert_eq!(summary.income_this_month, 100_000.0);
    assert_eq!(summary.expenses_this_month, 40_000.0);
    assert_eq!(summary.current_balance, 60_000.0);
    // A growing ledger with no prior-month data reads as full growth for
    // income and flat for expenses.
    assert_eq!(summary.income_change_percent, 100.0);
    assert_eq!(summary.expenses_change_percent, 0.0);
}

#[tokio::test]
async fn dashboard_change_is_month_over_month() {
    let db = common::migrated_db();
    let services = common::services(&db);

    create(
        &services,
        "Salary",
        100_000.0,
        "Salary",
        first_of_previous_month(),
        TransactionType::Income,
    )
    .await;
    create(
        &services,
        "Salary",
        150_000.0,
        "Salary",
        first_of_current_month(),
        TransactionType::Income,
    )
    .await;

    let summary = services.summary.get_dashboard_summary().unwrap();
    assert_eq!(summary.income_this_month, 150_000.0);
    assert_eq!(summary.income_change_percent, 50.0);
    assert_eq!(summary.current_balance, 250_000.0);
}

#[tokio::test]
async fn spending_by_category_sorts_largest_first() {
    let db = common::migrated_db();
    let services = common::services(&db);
    let on = date(2024, 5, 10);

    create(&services, "Rent", 900_000.0, "Housing", on, TransactionType::Expense).await;
    create(&services, "Groceries", 50_000.0, "Food", on, TransactionType::Expense).await;
    create(&services, "Takeout", 25_000.0, "Food", on, TransactionType::Expense).await;
    create(&services, "Salary", 100_000.0, "Salary", on, TransactionType::Income).await;

    let spending = services.summary.get_spending_by_category(None, None).unwrap();
    assert_eq!(spending.len(), 2);
    assert_eq!(spending[0].category, "Housing");
    assert_eq!(spending[0].amount, 900_000.0);
    assert_eq!(spending[1].category, "Food");
    assert_eq!(spending[1].amount, 75_000.0);

    // A window excluding every expense yields an empty breakdown.
    let windowed = services
        .summary
        .get_spending_by_category(Some(date(2023, 1, 1)), Some(date(2023, 12, 31)))
        .unwrap();
    assert!(windowed.is_empty());
}

#[tokio::test]
async fn financial_totals_cover_both_currencies() {
    let db = common::migrated_db();
    let services = common::services(&db);
    let on = date(2024, 5, 10);

    create(&services, "Salary", 100_000.0, "Salary", on, TransactionType::Income).await;
    create(&services, "Rent", 40_000.0, "Housing", on, TransactionType::Expense).await;

    let totals = services.summary.financial_totals().unwrap();
    assert_eq!(totals.income.ars, 100_000.0);
    assert_eq!(totals.income.usd, 100.0);
    assert_eq!(totals.expenses.ars, 40_000.0);
    assert_eq!(totals.expenses.usd, 40.0);
}

#[tokio::test]
async fn latest_incomes_are_newest_first_and_capped() {
    let db = common::migrated_db();
    let services = common::services(&db);

    for day in 1..=6 {
        create(
            &services,
            &format!("income-{}", day),
            10_000.0,
            "Salary",
            date(2024, 5, day),
            TransactionType::Income,
        )
        .await;
    }

    let latest = services.summary.latest_incomes().unwrap();
    assert_eq!(latest.len(), 5);
    assert_eq!(latest[0].name, "income-6");
    // The oldest entry falls off the widget.
    assert!(latest.iter().all(|e| e.name != "income-1"));
    assert_eq!(latest[0].amount, 10.0);
    assert_eq!(latest[0].formatted_amount, "$10.00");
}

#[tokio::test]
async fn latest_expenses_rank_by_amount() {
    let db = common::migrated_db();
    let services = common::services(&db);
    let on = date(2024, 5, 10);

    create(&services, "Coffee", 5_000.0, "Food", on, TransactionType::Expense).await;
    create(&services, "Rent", 900_000.0, "Housing", on, TransactionType::Expense).await;
    create(&services, "Groceries", 50_000.0, "Food", on, TransactionType::Expense).await;

    let latest = services.summary.latest_expenses().unwrap();
    let names: Vec<&str> = latest.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Groceries", "Coffee"]);
}
