//! HTML dashboard generation
//!
//! Generates a self-contained HTML dashboard with embedded CSS: a
//! presentation video link, KPI tiles, a monthly-trend bar chart (pure
//! HTML/CSS bars), the recent registry, the three category-pattern tables,
//! and the external visualization embeds. Embed content is opaque; no data
//! flows to or from the iframes.

use crate::assets::SidebarAssets;
use crate::config::ResolvedConfig;
use crate::dashboard::DashboardView;
use crate::patterns::CategorySlice;
use crate::record::AlertRecord;

/// Render the dashboard as a self-contained HTML document
pub fn render_html_dashboard(
    dashboard: &DashboardView,
    config: &ResolvedConfig,
    assets: &SidebarAssets,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Alert Control Center</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {header}
        {video}
        {kpis}
        {trend}
        {recent}
        {slices}
        {embeds}
        {footer}
    </div>
</body>
</html>"#,
        css = inline_css(),
        header = render_header(dashboard, assets),
        video = render_video(&config.video_url),
        kpis = render_kpi_tiles(dashboard),
        trend = render_trend_chart(dashboard),
        recent = render_recent_table(&dashboard.recent),
        slices = render_slice_columns(&dashboard.slices),
        embeds = render_embeds(&config.embed_urls),
        footer = render_footer(),
    )
}

/// Minimal escaping for values interpolated into HTML attributes
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, sans-serif;
       background: linear-gradient(135deg, #E8F5E9 0%, #E3F2FD 100%); }
.container { max-width: 1200px; margin: 0 auto; padding: 24px; }
.card { background: rgba(255,255,255,0.9); border-radius: 20px; padding: 20px;
        box-shadow: 0 8px 32px 0 rgba(31,38,135,0.07); margin-bottom: 25px; }
h1 { color: #004B8D; font-weight: 800; }
h3 { color: #2E86C1; font-weight: 700; }
.kpi-row { display: flex; gap: 16px; }
.kpi { flex: 1; text-align: center; }
.kpi .value { font-size: 2em; font-weight: 700; color: #004B8D; }
.kpi .label { color: #666; }
.chart { display: flex; align-items: flex-end; gap: 2px; height: 220px; }
.chart .bar { flex: 1; background: #004B8D; min-height: 1px; }
.chart-labels { display: flex; gap: 2px; font-size: 0.6em; color: #666; }
.chart-labels span { flex: 1; text-align: center; overflow: hidden; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #eee; }
th { color: #2E86C1; }
.columns { display: flex; gap: 16px; }
.columns .card { flex: 1; }
iframe { width: 100%; border: 0; }
.fallback { color: #B7950B; font-weight: 700; }
.footer { color: #999; font-size: 0.8em; text-align: center; }
"#
}

fn render_header(dashboard: &DashboardView, assets: &SidebarAssets) -> String {
    let logo = match &assets.logo {
        Some(path) => format!(
            r#"<img src="{}" alt="logo" width="100">"#,
            escape_attr(&path.display().to_string())
        ),
        // Fallback label when the logo file is absent
        None => r#"<span class="fallback">&#9889; alertdeck</span>"#.to_string(),
    };
    let audio = match &assets.audio {
        Some(path) => format!(
            r#"<audio controls src="{}"></audio>"#,
            escape_attr(&path.display().to_string())
        ),
        None => r#"<span class="fallback">&#9888; audio file not found</span>"#.to_string(),
    };
    let filters = if dashboard.selection.is_unconstrained() {
        "all years".to_string()
    } else {
        let years: Vec<String> = dashboard
            .selection
            .years
            .iter()
            .map(|y| y.to_string())
            .collect();
        years.join(", ")
    };

    format!(
        r#"<div class="card">
    {logo}
    <h1>Alert Control Center</h1>
    <p>Selected period: {filters}</p>
    {audio}
</div>"#
    )
}

fn render_video(url: &str) -> String {
    format!(
        r#"<div class="card">
    <h3>Server Presentation</h3>
    <p><a href="{url}" target="_blank" rel="noopener">Watch the presentation video</a></p>
</div>"#,
        url = escape_attr(url),
    )
}

fn render_kpi_tiles(dashboard: &DashboardView) -> String {
    format!(
        r#"<div class="card kpi-row">
    <div class="kpi"><div class="value">{total}</div><div class="label">Total Alerts (filtered)</div></div>
    <div class="kpi"><div class="value">{critical}</div><div class="label">Active Critical Alerts</div></div>
</div>"#,
        total = dashboard.base_total,
        critical = dashboard.base_critical,
    )
}

/// Monthly trend as pure HTML/CSS bars; omitted entirely for an empty view
fn render_trend_chart(dashboard: &DashboardView) -> String {
    if dashboard.trend.is_empty() {
        return String::new();
    }

    let max_count = dashboard
        .trend
        .iter()
        .map(|m| m.count)
        .max()
        .unwrap_or(1)
        .max(1);

    let bars: Vec<String> = dashboard
        .trend
        .iter()
        .map(|m| {
            let height = (m.count as f64 / max_count as f64 * 100.0).round();
            format!(
                r#"<div class="bar" style="height: {}%" title="{}: {}"></div>"#,
                height, m.period, m.count
            )
        })
        .collect();
    let labels: Vec<String> = dashboard
        .trend
        .iter()
        .map(|m| format!("<span>{}</span>", m.period))
        .collect();

    format!(
        r#"<div class="card">
    <h3>Historical Trend</h3>
    <div class="chart">{bars}</div>
    <div class="chart-labels">{labels}</div>
</div>"#,
        bars = bars.join(""),
        labels = labels.join(""),
    )
}

fn render_recent_table(recent: &[AlertRecord]) -> String {
    let rows: Vec<String> = recent
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                r.formatted(),
                r.reason.as_str(),
                r.year()
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h3>Recent Registry</h3>
    <table>
        <tr><th>Date</th><th>Reason</th><th>Year</th></tr>
        {rows}
    </table>
</div>"#,
        rows = rows.join("\n        "),
    )
}

fn render_slice_columns(slices: &[CategorySlice]) -> String {
    let columns: Vec<String> = slices
        .iter()
        .map(|slice| {
            let rows: Vec<String> = slice
                .records
                .iter()
                .map(|r| {
                    format!(
                        "<tr><td>{}</td><td>{}</td></tr>",
                        r.formatted(),
                        r.reason.as_str()
                    )
                })
                .collect();
            format!(
                r#"<div class="card">
        <h3>Pattern: {title}</h3>
        <table>
            <tr><th>Date</th><th>Reason</th></tr>
            {rows}
        </table>
    </div>"#,
                title = slice.kind.title(),
                rows = rows.join("\n            "),
            )
        })
        .collect();

    format!(
        r#"<div class="columns">
    {columns}
</div>"#,
        columns = columns.join("\n    "),
    )
}

/// External third-party visualizations, displayed verbatim in frames
fn render_embeds(urls: &[String]) -> String {
    if urls.is_empty() {
        return String::new();
    }

    let frames: Vec<String> = urls
        .iter()
        .map(|url| {
            format!(
                r#"<iframe src="{}" height="500" loading="lazy"></iframe>"#,
                escape_attr(url)
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h3>External Dashboards</h3>
    {frames}
</div>"#,
        frames = frames.join("\n    "),
    )
}

fn render_footer() -> String {
    r#"<div class="footer">Generated by alertdeck from a synthetic, seed-fixed dataset.</div>"#
        .to_string()
}
