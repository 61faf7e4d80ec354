//! Alertdeck core library - deterministic synthetic alert dataset generation,
//! filtering, and dashboard view derivation

#![deny(warnings)]

// Global invariants enforced in this crate:
// - The generated table is immutable once built
// - All derived views are computed, never stored
// - Identical parameters yield byte-for-byte identical tables and output
// - An empty filter selection means "no constraint", never "exclude all"
// - The reason category set is closed

pub mod aggregate;
pub mod assets;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod generate;
pub mod html;
pub mod live;
pub mod patterns;
pub mod record;
pub mod render;

pub use config::ResolvedConfig;
pub use dashboard::{build_dashboard, DashboardView};
pub use filter::{filter, month_options, year_options, FilterSelection, FilteredView};
pub use generate::{AlertTable, GeneratorParams};
pub use live::{KpiSnapshot, LiveFeed, LiveFeedConfig, Pacer, ThreadPacer};
pub use record::{AlertRecord, MonthPeriod, Reason};
pub use render::{render_json, render_text};
