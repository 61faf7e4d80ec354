//! Text and JSON rendering of a dashboard view
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Identical views yield byte-for-byte identical output

use crate::dashboard::DashboardView;
use crate::record::AlertRecord;
use anyhow::{Context, Result};

/// Render the dashboard as aligned text tables
pub fn render_text(dashboard: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str("Alert Control Center\n");
    out.push_str(&"=".repeat(80));
    out.push('\n');

    // Selection summary
    if dashboard.selection.is_unconstrained() {
        out.push_str("Filters: none (all years, all months)\n");
    } else {
        let years: Vec<String> = dashboard
            .selection
            .years
            .iter()
            .map(|y| y.to_string())
            .collect();
        let months: Vec<String> = dashboard
            .selection
            .months
            .iter()
            .map(|m| m.to_string())
            .collect();
        out.push_str(&format!(
            "Filters: years=[{}] months=[{}]\n",
            years.join(", "),
            months.join(", ")
        ));
    }

    // KPI bases
    out.push_str(&format!(
        "Total alerts: {}  |  Critical alerts: {}\n",
        dashboard.base_total, dashboard.base_critical
    ));

    // Monthly trend (omitted for an empty view)
    if !dashboard.trend.is_empty() {
        out.push_str("\nMonthly Trend:\n");
        out.push_str(&format!("{:<10} {:>8}\n", "Month", "Count"));
        out.push_str(&"-".repeat(19));
        out.push('\n');
        for monthly in &dashboard.trend {
            out.push_str(&format!(
                "{:<10} {:>8}\n",
                monthly.period.to_string(),
                monthly.count
            ));
        }
    }

    // Recent registry
    out.push_str("\nRecent Registry:\n");
    out.push_str(&format!(
        "{:<22} {:<24} {:<6}\n",
        "Date", "Reason", "Year"
    ));
    out.push_str(&"-".repeat(54));
    out.push('\n');
    for record in &dashboard.recent {
        out.push_str(&format!(
            "{:<22} {:<24} {:<6}\n",
            record.formatted(),
            record.reason.as_str(),
            record.year()
        ));
    }

    // Category slices
    for slice in &dashboard.slices {
        out.push_str(&format!("\nPattern: {}\n", slice.kind.title()));
        out.push_str(&format!("{:<22} {:<24}\n", "Date", "Reason"));
        out.push_str(&"-".repeat(47));
        out.push('\n');
        for record in &slice.records {
            out.push_str(&render_slice_row(record));
        }
    }

    out
}

fn render_slice_row(record: &AlertRecord) -> String {
    format!("{:<22} {:<24}\n", record.formatted(), record.reason.as_str())
}

/// Render the dashboard as pretty-printed JSON
pub fn render_json(dashboard: &DashboardView) -> Result<String> {
    serde_json::to_string_pretty(dashboard).context("failed to serialize dashboard to JSON")
}
