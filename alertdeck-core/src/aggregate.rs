//! Aggregation views over a filtered selection
//!
//! Global invariants enforced:
//! - Aggregates are strictly derived (never stored, always computed)
//! - Deterministic ordering (month periods ascending)
//! - No modification of the underlying view

use crate::filter::FilteredView;
use crate::record::{AlertRecord, MonthPeriod};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Row count for one month period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyCount {
    pub period: MonthPeriod,
    pub count: usize,
}

/// Group the view by month period and count rows per group.
///
/// The result is ordered by period ascending and its counts sum to the
/// view length.
pub fn aggregate_by_month(view: &FilteredView) -> Vec<MonthlyCount> {
    let mut counts: HashMap<MonthPeriod, usize> = HashMap::new();
    for record in view.records() {
        *counts.entry(record.month_period()).or_insert(0) += 1;
    }

    let mut monthly: Vec<MonthlyCount> = counts
        .into_iter()
        .map(|(period, count)| MonthlyCount { period, count })
        .collect();

    // Sort deterministically by period
    monthly.sort_by_key(|m| m.period);
    monthly
}

/// The view sorted by timestamp descending, truncated to `top` rows
pub fn recent_registry(view: &FilteredView, top: usize) -> Vec<AlertRecord> {
    let mut records: Vec<AlertRecord> = view.records().to_vec();
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records.truncate(top);
    records
}

/// Count of view rows whose reason is critical (label contains "Risk")
pub fn critical_count(view: &FilteredView) -> usize {
    view.records().iter().filter(|r| r.reason.is_critical()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, FilterSelection};
    use crate::generate::{AlertTable, GeneratorParams};

    fn view_for(selection: FilterSelection) -> FilteredView {
        let table = AlertTable::generate(GeneratorParams::default());
        filter(&table, &selection)
    }

    #[test]
    fn test_aggregation_total_equals_view_length() {
        let view = view_for(FilterSelection::none());
        let monthly = aggregate_by_month(&view);
        let total: usize = monthly.iter().map(|m| m.count).sum();
        assert_eq!(total, view.len());
    }

    #[test]
    fn test_aggregation_is_ordered_ascending() {
        let view = view_for(FilterSelection::none());
        let monthly = aggregate_by_month(&view);
        for pair in monthly.windows(2) {
            assert!(pair[0].period < pair[1].period);
        }
    }

    #[test]
    fn test_aggregation_of_filtered_year() {
        let view = view_for(FilterSelection {
            years: vec![2025],
            months: vec![],
        });
        let monthly = aggregate_by_month(&view);
        assert!(monthly.iter().all(|m| m.period.year == 2025));
        let total: usize = monthly.iter().map(|m| m.count).sum();
        assert_eq!(total, view.len());
    }

    #[test]
    fn test_aggregation_of_empty_view() {
        let view = view_for(FilterSelection {
            years: vec![1999],
            months: vec![],
        });
        assert!(aggregate_by_month(&view).is_empty());
    }

    #[test]
    fn test_recent_registry_sorted_descending_and_truncated() {
        let view = view_for(FilterSelection::none());
        let recent = recent_registry(&view, 10);
        assert_eq!(recent.len(), 10);
        for pair in recent.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        // The most recent row of the view leads the registry
        let max = view
            .records()
            .iter()
            .map(|r| r.timestamp)
            .max()
            .unwrap();
        assert_eq!(recent[0].timestamp, max);
    }

    #[test]
    fn test_recent_registry_shorter_than_top() {
        let view = view_for(FilterSelection {
            years: vec![1999],
            months: vec![],
        });
        assert!(recent_registry(&view, 10).is_empty());
    }

    #[test]
    fn test_critical_count_matches_manual_filter() {
        let view = view_for(FilterSelection::none());
        let expected = view
            .records()
            .iter()
            .filter(|r| r.reason.as_str().contains("Risk"))
            .count();
        assert_eq!(critical_count(&view), expected);
    }
}
