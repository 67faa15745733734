use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default number of items per feed page
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES_SENTINEL: &str = "All categories";

/// Categories offered when the store holds none at all
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Housing",
    "Transportation",
    "Entertainment",
    "Other",
    "Salary",
    "Investment",
];

/// Placeholder ARS per USD rate used by the fixed-rate provider
pub const FIXED_ARS_PER_USD: Decimal = dec!(1000);

/// Prefix for formatted income amounts
pub const POSITIVE_AMOUNT_PREFIX: &str = "+$";

/// Prefix for formatted expense amounts
pub const NEGATIVE_AMOUNT_PREFIX: &str = "-$";

/// Number of entries returned by the "latest" dashboard widgets
pub const LATEST_ENTRIES_LIMIT: i64 = 5;
