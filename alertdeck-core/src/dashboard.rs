//! Dashboard view composition
//!
//! Bundles every derived view for one filter selection: the monthly trend,
//! the recent registry, the three category slices, and the base KPI pair the
//! live feed perturbs. Strictly derived; building a view never mutates the
//! table.

use crate::aggregate::{aggregate_by_month, critical_count, recent_registry, MonthlyCount};
use crate::filter::{filter, FilterSelection};
use crate::generate::AlertTable;
use crate::patterns::{CategorySlice, PatternSet};
use crate::record::AlertRecord;
use anyhow::Result;
use serde::Serialize;

/// Default truncation for slices and the recent registry
pub const DEFAULT_TOP: usize = 10;

/// Every derived view for one filter selection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardView {
    pub selection: FilterSelection,
    /// Monthly grouped counts, ascending by period (empty view: no trend)
    pub trend: Vec<MonthlyCount>,
    /// Most recent rows, timestamp descending
    pub recent: Vec<AlertRecord>,
    /// The three category-pattern slices, in display order
    pub slices: Vec<CategorySlice>,
    /// Row count of the filtered view (live-feed base)
    pub base_total: usize,
    /// Critical row count of the filtered view (live-feed base)
    pub base_critical: usize,
}

/// Build the full dashboard view for a selection
pub fn build_dashboard(
    table: &AlertTable,
    selection: &FilterSelection,
    top: usize,
) -> Result<DashboardView> {
    let view = filter(table, selection);
    let patterns = PatternSet::new()?;

    Ok(DashboardView {
        selection: selection.clone(),
        trend: aggregate_by_month(&view),
        recent: recent_registry(&view, top),
        slices: patterns.slices(&view, top),
        base_total: view.len(),
        base_critical: critical_count(&view),
    })
}
