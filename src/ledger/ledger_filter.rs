use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::ALL_CATEGORIES_SENTINEL;
use crate::db::probe::SchemaDescriptor;
use crate::ledger::ledger_model::TransactionType;

/// Caller-facing filter over the transaction feed. All fields optional; the
/// empty filter matches every row in both ledgers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub search_term: Option<String>,
}

/// Filter normalized against the probed schema, ready to be applied verbatim
/// to either ledger table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    /// Closed interval; present only when both ends were supplied.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Exact category match; the "All categories" sentinel compiles to None.
    pub category: Option<String>,
    /// `%term%` pattern for a case-insensitive LIKE over `name` (and
    /// `description` where that column exists).
    pub search_pattern: Option<String>,
    schema: SchemaDescriptor,
}

impl TransactionFilter {
    pub fn compile(&self, schema: &SchemaDescriptor) -> CompiledFilter {
        let date_range = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };

        let category = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES_SENTINEL)
            .map(str::to_string);

        let search_pattern = self
            .search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("%{}%", t));

        CompiledFilter {
            date_range,
            category,
            search_pattern,
            schema: *schema,
        }
    }
}

impl CompiledFilter {
    /// Whether the search clause should also match `description` on the
    /// ledger holding `kind`.
    pub fn search_description(&self, kind: TransactionType) -> bool {
        self.search_pattern.is_some() && self.schema.has_description(kind)
    }

    /// Whether row fetches against the ledger holding `kind` can select the
    /// physical `description` column.
    pub fn include_description(&self, kind: TransactionType) -> bool {
        self.schema.has_description(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_schema() -> SchemaDescriptor {
        SchemaDescriptor {
            has_categories_table: true,
            incomes_has_description: true,
            expenses_has_description: true,
        }
    }

    #[test]
    fn empty_filter_compiles_to_match_all() {
        let compiled = TransactionFilter::default().compile(&full_schema());
        assert_eq!(compiled.date_range, None);
        assert_eq!(compiled.category, None);
        assert_eq!(compiled.search_pattern, None);
    }

    #[test]
    fn date_range_requires_both_ends() {
        let filter = TransactionFilter {
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ..Default::default()
        };
        assert_eq!(filter.compile(&full_schema()).date_range, None);

        let filter = TransactionFilter {
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            ..Default::default()
        };
        assert!(filter.compile(&full_schema()).date_range.is_some());
    }

    #[test]
    fn sentinel_category_is_dropped() {
        let filter = TransactionFilter {
            category: Some(ALL_CATEGORIES_SENTINEL.to_string()),
            ..Default::default()
        };
        assert_eq!(filter.compile(&full_schema()).category, None);

        let filter = TransactionFilter {
            category: Some("Housing".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filter.compile(&full_schema()).category.as_deref(),
            Some("Housing")
        );
    }

    #[test]
    fn search_term_becomes_like_pattern() {
        let filter = TransactionFilter {
            search_term: Some(" rent ".to_string()),
            ..Default::default()
        };
        let compiled = filter.compile(&full_schema());
        assert_eq!(compiled.search_pattern.as_deref(), Some("%rent%"));
        assert!(compiled.search_description(TransactionType::Income));
    }

    #[test]
    fn blank_search_term_is_dropped() {
        let filter = TransactionFilter {
            search_term: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.compile(&full_schema()).search_pattern, None);
    }

    #[test]
    fn description_search_follows_capability_flag() {
        let schema = SchemaDescriptor {
            has_categories_table: false,
            incomes_has_description: false,
            expenses_has_description: true,
        };
        let filter = TransactionFilter {
            search_term: Some("rent".to_string()),
            ..Default::default()
        };
        let compiled = filter.compile(&schema);
        assert!(!compiled.search_description(TransactionType::Income));
        assert!(compiled.search_description(TransactionType::Expense));
    }
}
