//! Year / month-period filtering over the generated table
//!
//! An empty selection set means "no constraint", never "exclude all".
//! Filtering is order-preserving and never mutates the table.

use crate::generate::AlertTable;
use crate::record::{AlertRecord, MonthPeriod};
use serde::{Deserialize, Serialize};

/// User-selected filters. Empty vectors apply no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterSelection {
    pub years: Vec<i32>,
    pub months: Vec<MonthPeriod>,
}

impl FilterSelection {
    /// Selection that passes every record
    pub fn none() -> Self {
        FilterSelection::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.years.is_empty() && self.months.is_empty()
    }

    /// Membership test: both predicates must pass (empty set = pass)
    pub fn matches(&self, record: &AlertRecord) -> bool {
        if !self.years.is_empty() && !self.years.contains(&record.year()) {
            return false;
        }
        if !self.months.is_empty() && !self.months.contains(&record.month_period()) {
            return false;
        }
        true
    }
}

/// Order-preserving sub-selection of the table. Same schema, derived only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredView {
    records: Vec<AlertRecord>,
}

impl FilteredView {
    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Apply the selection to the table. An empty result is valid, not an error.
pub fn filter(table: &AlertTable, selection: &FilterSelection) -> FilteredView {
    let records = table
        .records()
        .iter()
        .filter(|r| selection.matches(r))
        .copied()
        .collect();
    FilteredView { records }
}

/// Distinct years present in the table, ascending
pub fn year_options(table: &AlertTable) -> Vec<i32> {
    let mut years: Vec<i32> = table.records().iter().map(|r| r.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Distinct month periods of the year-filtered subset, ascending.
///
/// Cascading filter: the candidate set is derived from the rows passing the
/// year selection, not from the full table.
pub fn month_options(table: &AlertTable, years: &[i32]) -> Vec<MonthPeriod> {
    let mut months: Vec<MonthPeriod> = table
        .records()
        .iter()
        .filter(|r| years.is_empty() || years.contains(&r.year()))
        .map(|r| r.month_period())
        .collect();
    months.sort_unstable();
    months.dedup();
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratorParams;

    fn table() -> AlertTable {
        AlertTable::generate(GeneratorParams::default())
    }

    #[test]
    fn test_empty_selection_passes_everything() {
        let table = table();
        let view = filter(&table, &FilterSelection::none());
        assert_eq!(view.len(), table.len());
    }

    #[test]
    fn test_year_filter_returns_only_matching_rows() {
        let table = table();
        let selection = FilterSelection {
            years: vec![2025],
            months: vec![],
        };
        let view = filter(&table, &selection);
        assert!(!view.is_empty());
        assert!(view.records().iter().all(|r| r.year() == 2025));
    }

    #[test]
    fn test_filter_is_exact_membership() {
        let table = table();
        let selection = FilterSelection {
            years: vec![2021, 2023],
            months: vec![],
        };
        let view = filter(&table, &selection);
        let expected = table
            .records()
            .iter()
            .filter(|r| r.year() == 2021 || r.year() == 2023)
            .count();
        assert_eq!(view.len(), expected);
    }

    #[test]
    fn test_month_filter_combines_with_year_filter() {
        let table = table();
        let period = MonthPeriod::new(2024, 3);
        let selection = FilterSelection {
            years: vec![2024],
            months: vec![period],
        };
        let view = filter(&table, &selection);
        assert!(!view.is_empty());
        assert!(view.records().iter().all(|r| r.month_period() == period));
    }

    #[test]
    fn test_unknown_selection_yields_empty_view() {
        let table = table();
        let selection = FilterSelection {
            years: vec![1999],
            months: vec![],
        };
        let view = filter(&table, &selection);
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let table = table();
        let selection = FilterSelection {
            years: vec![2022],
            months: vec![],
        };
        let view = filter(&table, &selection);
        for pair in view.records().windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_year_options_cover_window() {
        let years = year_options(&table());
        assert_eq!(years, vec![2020, 2021, 2022, 2023, 2024, 2025]);
    }

    #[test]
    fn test_month_options_cascade_from_year_selection() {
        let table = table();
        let months = month_options(&table, &[2025]);
        // Window ends 2025-06-30 (exclusive), so June is the last 2025 month
        assert_eq!(
            months,
            (1..=6).map(|m| MonthPeriod::new(2025, m)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_month_options_without_year_filter_span_full_table() {
        let table = table();
        let months = month_options(&table, &[]);
        // 5 full years (60 months) plus Jan-Jun 2025
        assert_eq!(months.len(), 66);
        assert_eq!(months[0], MonthPeriod::new(2020, 1));
        assert_eq!(months[65], MonthPeriod::new(2025, 6));
    }
}
