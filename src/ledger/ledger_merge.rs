//! Normalizes raw rows from both ledgers into the common feed shape, applies
//! the sign convention, sorts and slices the requested page. Everything here
//! is pure: given the same two fetch results the output is deterministic.

use crate::constants::{NEGATIVE_AMOUNT_PREFIX, POSITIVE_AMOUNT_PREFIX};
use crate::ledger::ledger_model::{
    Currency, LedgerRow, Pagination, Transaction, TransactionType,
};

/// Display string for a feed amount: `+$12.50` / `-$12.50`, magnitude always
/// non-negative.
pub fn format_amount(usd: f64, kind: TransactionType) -> String {
    let prefix = match kind {
        TransactionType::Income => POSITIVE_AMOUNT_PREFIX,
        TransactionType::Expense => NEGATIVE_AMOUNT_PREFIX,
    };
    format!("{}{:.2}", prefix, usd.abs())
}

/// Shapes the rows of one ledger into feed transactions. Amounts carry the
/// USD value, negated for expenses.
pub fn shape_rows(rows: Vec<LedgerRow>, kind: TransactionType) -> Vec<Transaction> {
    rows.into_iter()
        .map(|row| {
            let amount = match kind {
                TransactionType::Income => row.usd,
                TransactionType::Expense => -row.usd,
            };
            Transaction {
                id: row.id,
                name: row.name,
                amount,
                formatted_amount: format_amount(row.usd, kind),
                category: row.category,
                category_id: row.category_id,
                category_color: None,
                date: row.date,
                transaction_type: kind,
                currency: Currency::Usd,
                description: row.description,
            }
        })
        .collect()
}

/// Concatenates both shaped lists and sorts by date descending. The relative
/// order of same-date entries is unspecified.
pub fn merge_transactions(
    mut incomes: Vec<Transaction>,
    mut expenses: Vec<Transaction>,
) -> Vec<Transaction> {
    incomes.append(&mut expenses);
    incomes.sort_by(|a, b| b.date.cmp(&a.date));
    incomes
}

/// Pagination envelope for a feed of `total_items` entries.
pub fn paginate(total_items: i64, page: i64, page_size: i64) -> Pagination {
    let total_pages = if total_items == 0 {
        1
    } else {
        (total_items + page_size - 1) / page_size
    };
    Pagination {
        total_items,
        total_pages,
        current_page: page,
        items_per_page: page_size,
    }
}

/// Slice `[(page - 1) * page_size, page * page_size)` of the merged list.
pub fn page_slice(items: Vec<Transaction>, page: i64, page_size: i64) -> Vec<Transaction> {
    let start = ((page - 1).max(0) * page_size) as usize;
    items
        .into_iter()
        .skip(start)
        .take(page_size.max(0) as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn row(name: &str, date: (i32, u32, u32), usd: f64) -> LedgerRow {
        LedgerRow {
            id: format!("row_{}", name),
            name: name.to_string(),
            category: "Other".to_string(),
            category_id: None,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            ars: usd * 1000.0,
            usd,
            description: String::new(),
        }
    }

    #[test]
    fn sign_convention_follows_ledger_kind() {
        let incomes = shape_rows(vec![row("salary", (2024, 3, 1), 1200.0)], TransactionType::Income);
        let expenses = shape_rows(vec![row("rent", (2024, 3, 2), 500.0)], TransactionType::Expense);

        assert_eq!(incomes[0].amount, 1200.0);
        assert_eq!(incomes[0].formatted_amount, "+$1200.00");
        assert_eq!(expenses[0].amount, -500.0);
        assert_eq!(expenses[0].formatted_amount, "-$500.00");
    }

    #[test]
    fn formatted_magnitude_is_never_negative() {
        let shaped = shape_rows(vec![row("rent", (2024, 3, 2), 500.0)], TransactionType::Expense);
        assert!(!shaped[0].formatted_amount.contains("--"));
        assert!(shaped[0].formatted_amount.starts_with("-$5"));
    }

    #[test]
    fn merge_sorts_by_date_descending() {
        let incomes = shape_rows(
            vec![row("a", (2024, 1, 10), 1.0), row("b", (2024, 3, 5), 1.0)],
            TransactionType::Income,
        );
        let expenses = shape_rows(
            vec![row("c", (2024, 2, 20), 1.0)],
            TransactionType::Expense,
        );

        let merged = merge_transactions(incomes, expenses);
        let names: Vec<&str> = merged.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn page_slice_takes_the_requested_window() {
        let items = shape_rows(
            (0..5).map(|i| row(&format!("t{}", i), (2024, 1, 5 - i as u32), 1.0)).collect(),
            TransactionType::Income,
        );
        let merged = merge_transactions(items, Vec::new());

        let page2 = page_slice(merged.clone(), 2, 2);
        assert_eq!(page2.len(), 2);
        assert_eq!(page2[0].name, "t2");

        let page3 = page_slice(merged, 3, 2);
        assert_eq!(page3.len(), 1);
    }

    #[test]
    fn empty_feed_still_has_one_page() {
        let pagination = paginate(0, 1, 10);
        assert_eq!(pagination.total_items, 0);
        assert_eq!(pagination.total_pages, 1);
    }

    proptest! {
        #[test]
        fn total_pages_matches_ceiling_division(total in 0i64..100_000, size in 1i64..500) {
            let pagination = paginate(total, 1, size);
            let expected = std::cmp::max(1, (total as f64 / size as f64).ceil() as i64);
            prop_assert_eq!(pagination.total_pages, expected);
        }
    }
}
