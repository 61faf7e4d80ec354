//! Configuration file support for alertdeck
//!
//! Loads dashboard configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.alertdeckrc.json` in the working directory
//! 3. `alertdeck.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file
//! values. Generator parameters (seed, window, count) are fixed constants
//! and deliberately not configurable.

use crate::dashboard::DEFAULT_TOP;
use crate::live::{DEFAULT_INTERVAL, DEFAULT_TICKS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Built-in catalog of embedded third-party visualizations: four hosted
/// 3D-chart pages and two parameterized BI-dashboard views. Content is
/// opaque; the core contributes no data and reads nothing back.
pub const DEFAULT_EMBED_URLS: &[&str] = &[
    "https://gentle-cuchufli-2f8ece.netlify.app/",
    "https://superlative-kleicha-c9c31a.netlify.app/",
    "https://jolly-bubblegum-f1baa6.netlify.app/",
    "https://curious-entremet-041122.netlify.app/",
    "https://public.tableau.com/views/dashboaradministracion/Dashboard5?:embed=yes&:showVizHome=no&:tabs=yes&:toolbar=yes",
    "https://public.tableau.com/views/Dashboard_17642791985070/MontosfinancierosysuMAPEatravsdelosaos?:embed=yes&:showVizHome=no&:tabs=yes&:toolbar=yes",
];

/// Default presentation video shown in the dashboard header section
pub const DEFAULT_VIDEO_URL: &str = "https://www.youtube.com/watch?v=Blfe4DntymI";

/// Alertdeck configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertdeckConfig {
    /// Years pre-selected when the CLI passes no --year flags
    #[serde(default)]
    pub default_years: Vec<i32>,

    /// Path to the sidebar logo image (missing file is a warning, not an error)
    #[serde(default)]
    pub logo_path: Option<PathBuf>,

    /// Path to the ambient audio file (missing file is a warning, not an error)
    #[serde(default)]
    pub audio_path: Option<PathBuf>,

    /// Override for the embedded visualization URL catalog
    #[serde(default)]
    pub embed_urls: Option<Vec<String>>,

    /// Override for the presentation video link
    #[serde(default)]
    pub video_url: Option<String>,

    /// Live feed cadence overrides
    #[serde(default)]
    pub live: Option<LiveConfig>,

    /// Truncation for category slices and the recent registry (default: 10)
    #[serde(default)]
    pub top: Option<usize>,
}

/// Live feed cadence section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiveConfig {
    /// Number of snapshots per feed invocation (default: 200)
    pub ticks: Option<usize>,
    /// Pacing interval in seconds (default: 2.5)
    pub interval_secs: Option<f64>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub default_years: Vec<i32>,
    pub logo_path: Option<PathBuf>,
    pub audio_path: Option<PathBuf>,
    pub embed_urls: Vec<String>,
    pub video_url: String,
    pub live_ticks: usize,
    pub live_interval: Duration,
    pub top: usize,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl AlertdeckConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref live) = self.live {
            if let Some(ticks) = live.ticks {
                if ticks == 0 {
                    anyhow::bail!("live.ticks must be at least 1 (got 0)");
                }
            }
            if let Some(secs) = live.interval_secs {
                if !secs.is_finite() || secs <= 0.0 {
                    anyhow::bail!("live.interval_secs must be positive (got {})", secs);
                }
                if Duration::try_from_secs_f64(secs).is_err() {
                    anyhow::bail!("live.interval_secs is too large (got {})", secs);
                }
            }
        }

        if let Some(top) = self.top {
            if top == 0 {
                anyhow::bail!("top must be at least 1 (got 0)");
            }
        }

        if let Some(ref urls) = self.embed_urls {
            for url in urls {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("embed_urls entries must be absolute URLs (got '{}')", url);
                }
            }
        }

        if let Some(ref url) = self.video_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("video_url must be an absolute URL (got '{}')", url);
            }
        }

        // Unknown default_years are allowed: selections outside the data
        // simply yield empty views, not errors.
        Ok(())
    }

    /// Resolve config into a form ready for use, applying defaults
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let (live_ticks, live_interval) = match &self.live {
            Some(live) => {
                let interval = match live.interval_secs {
                    Some(secs) => Duration::try_from_secs_f64(secs).map_err(|e| {
                        anyhow::anyhow!("live.interval_secs {} is out of range: {}", secs, e)
                    })?,
                    None => DEFAULT_INTERVAL,
                };
                (live.ticks.unwrap_or(DEFAULT_TICKS), interval)
            }
            None => (DEFAULT_TICKS, DEFAULT_INTERVAL),
        };

        let embed_urls = match &self.embed_urls {
            Some(urls) => urls.clone(),
            None => DEFAULT_EMBED_URLS.iter().map(|u| u.to_string()).collect(),
        };

        Ok(ResolvedConfig {
            default_years: self.default_years.clone(),
            logo_path: self.logo_path.clone(),
            audio_path: self.audio_path.clone(),
            embed_urls,
            video_url: self
                .video_url
                .clone()
                .unwrap_or_else(|| DEFAULT_VIDEO_URL.to_string()),
            live_ticks,
            live_interval,
            top: self.top.unwrap_or(DEFAULT_TOP),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        AlertdeckConfig::default().resolve()
    }
}

/// Discover and load a config file from the working directory
///
/// Search order:
/// 1. `.alertdeckrc.json`
/// 2. `alertdeck.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(root: &Path) -> Result<Option<(AlertdeckConfig, PathBuf)>> {
    let rc_path = root.join(".alertdeckrc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    let config_path = root.join("alertdeck.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<AlertdeckConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: AlertdeckConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a working directory
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the directory.
/// Returns default config if nothing is found.
pub fn load_and_resolve(root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(root)? {
            Some((config, path)) => (config, Some(path)),
            None => (AlertdeckConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
