//! Alertdeck CLI - synthetic alerts dashboard

#![deny(warnings)]

// Global invariants enforced:
// - The alert table is built once per invocation and shared by reference
// - Deterministic output for identical filters and formats

use alertdeck_core::assets::SidebarAssets;
use alertdeck_core::config::{self, ResolvedConfig};
use alertdeck_core::dashboard::build_dashboard;
use alertdeck_core::live::{LiveFeed, LiveFeedConfig, ThreadPacer};
use alertdeck_core::{
    filter, month_options, render_json, render_text, year_options, AlertTable, FilterSelection,
    GeneratorParams, MonthPeriod,
};
use anyhow::Context;
use chrono::Timelike;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "alertdeck")]
#[command(about = "Synthetic alerts dashboard: deterministic dataset, filters, and live KPI simulation")]
#[command(version = env!("ALERTDECK_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dataset, apply filters, and render the dashboard
    Render {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Filter by year (repeatable; empty means all years)
        #[arg(long = "year")]
        years: Vec<i32>,

        /// Filter by month period, YYYY-MM (repeatable; empty means all months)
        #[arg(long = "month")]
        months: Vec<String>,

        /// Output file path (for HTML format, default: .alertdeck/dashboard.html)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the cascading year/month filter options
    Options {
        /// Restrict month options to these years (repeatable)
        #[arg(long = "year")]
        years: Vec<i32>,
    },
    /// Run the live KPI simulation feed
    Live {
        /// Number of snapshots (overrides config file)
        #[arg(long)]
        ticks: Option<usize>,

        /// Pacing interval in seconds (overrides config file)
        #[arg(long)]
        interval_secs: Option<f64>,

        /// Filter by year (repeatable)
        #[arg(long = "year")]
        years: Vec<i32>,

        /// Filter by month period, YYYY-MM (repeatable)
        #[arg(long = "month")]
        months: Vec<String>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or show the configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without rendering anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            format,
            years,
            months,
            output,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let selection = build_selection(&resolved, years, months)?;

            // The table is generated once and shared by reference
            let table = AlertTable::generate(GeneratorParams::default());
            let dashboard = build_dashboard(&table, &selection, resolved.top)?;

            match format {
                OutputFormat::Text => {
                    print!("{}", render_text(&dashboard));
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&dashboard)?);
                }
                OutputFormat::Html => {
                    let assets = SidebarAssets::resolve(&resolved);
                    for warning in &assets.warnings {
                        eprintln!("Warning: {}", warning);
                    }
                    let html = alertdeck_core::html::render_html_dashboard(
                        &dashboard, &resolved, &assets,
                    );
                    let output_path =
                        output.unwrap_or_else(|| PathBuf::from(".alertdeck/dashboard.html"));
                    write_html_report(&output_path, &html)?;
                    eprintln!("HTML dashboard written to: {}", output_path.display());
                }
            }
        }
        Commands::Options { years } => {
            let table = AlertTable::generate(GeneratorParams::default());

            println!("Years:");
            for year in year_options(&table) {
                println!("  {}", year);
            }

            // Month candidates cascade from the year selection
            println!("\nMonths:");
            for period in month_options(&table, &years) {
                println!("  {}", period);
            }
        }
        Commands::Live {
            ticks,
            interval_secs,
            years,
            months,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let selection = build_selection(&resolved, years, months)?;

            if let Some(secs) = interval_secs {
                if !secs.is_finite() || secs <= 0.0 {
                    anyhow::bail!("--interval-secs must be positive (got {})", secs);
                }
            }
            if let Some(t) = ticks {
                if t == 0 {
                    anyhow::bail!("--ticks must be at least 1 (got 0)");
                }
            }

            // CLI flags override config file values
            let interval = match interval_secs {
                Some(secs) => Duration::try_from_secs_f64(secs)
                    .map_err(|e| anyhow::anyhow!("--interval-secs {} is out of range: {}", secs, e))?,
                None => resolved.live_interval,
            };
            let feed_config = LiveFeedConfig {
                ticks: ticks.unwrap_or(resolved.live_ticks),
                interval,
            };

            let table = AlertTable::generate(GeneratorParams::default());
            let view = filter(&table, &selection);

            println!(
                "Live feed: {} snapshots at {:.1}s intervals (base total {}, base critical {})",
                feed_config.ticks,
                feed_config.interval.as_secs_f64(),
                view.len(),
                alertdeck_core::aggregate::critical_count(&view),
            );

            let feed =
                LiveFeed::for_view(&view, feed_config, StdRng::from_entropy(), ThreadPacer);
            for snapshot in feed {
                println!(
                    "[{:02}:{:02}:{:02}] total={} ({:+} vs last tick)  critical={}  activity={}",
                    snapshot.captured_at.hour(),
                    snapshot.captured_at.minute(),
                    snapshot.captured_at.second(),
                    snapshot.total,
                    snapshot.delta_total,
                    snapshot.critical,
                    snapshot.activity.as_str(),
                );
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let root = std::env::current_dir()?;
                match config::load_and_resolve(&root, path.as_deref()) {
                    Ok(resolved) => {
                        if let Some(ref p) = resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&root, path.as_deref())
                    .context("failed to load configuration")?;
                print_resolved_config(&resolved);
            }
        },
    }

    Ok(())
}

/// Load configuration, discovering from the current directory by default
fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&root, config_path)
        .context("failed to load configuration")?;
    if let Some(ref path) = resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }
    Ok(resolved)
}

/// Build the filter selection: CLI flags override config default years
fn build_selection(
    resolved: &ResolvedConfig,
    years: Vec<i32>,
    months: Vec<String>,
) -> anyhow::Result<FilterSelection> {
    let years = if years.is_empty() {
        resolved.default_years.clone()
    } else {
        years
    };

    let months = months
        .iter()
        .map(|m| m.parse::<MonthPeriod>())
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(FilterSelection { years, months })
}

fn print_resolved_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Filters:");
    let years: Vec<String> = resolved
        .default_years
        .iter()
        .map(|y| y.to_string())
        .collect();
    println!(
        "  default_years: {}",
        if years.is_empty() {
            "none".to_string()
        } else {
            years.join(", ")
        }
    );
    println!("  top: {}", resolved.top);
    println!();
    println!("Live feed:");
    println!("  ticks: {}", resolved.live_ticks);
    println!(
        "  interval_secs: {}",
        resolved.live_interval.as_secs_f64()
    );
    println!();
    println!("Assets:");
    println!(
        "  logo: {}",
        resolved
            .logo_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "  audio: {}",
        resolved
            .audio_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!();
    println!("Video: {}", resolved.video_url);
    println!();
    println!("Embeds: {} URL(s)", resolved.embed_urls.len());
    for url in &resolved.embed_urls {
        println!("  {}", url);
    }
}

/// Write the HTML dashboard to file with atomic write pattern
fn write_html_report(path: &Path, html: &str) -> anyhow::Result<()> {
    use std::fs;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    // Atomic write (temp + rename pattern)
    let temp_path = path.with_extension("html.tmp");
    fs::write(&temp_path, html)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
