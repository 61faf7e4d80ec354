//! Optional local asset resolution (sidebar logo, ambient audio)
//!
//! Missing files are recovered locally: the renderer substitutes a fallback
//! label and the caller may surface the warning. Asset problems never
//! propagate as errors.

use crate::config::ResolvedConfig;
use std::path::{Path, PathBuf};

/// Resolved optional assets plus warnings for anything missing
#[derive(Debug, Clone, Default)]
pub struct SidebarAssets {
    /// Logo path, present only when the file exists
    pub logo: Option<PathBuf>,
    /// Audio path, present only when the file exists
    pub audio: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl SidebarAssets {
    /// Resolve the configured asset paths against the filesystem
    pub fn resolve(config: &ResolvedConfig) -> SidebarAssets {
        let mut warnings = Vec::new();
        let logo = check(config.logo_path.as_deref(), "logo", &mut warnings);
        let audio = check(config.audio_path.as_deref(), "audio", &mut warnings);
        SidebarAssets {
            logo,
            audio,
            warnings,
        }
    }
}

fn check(path: Option<&Path>, kind: &str, warnings: &mut Vec<String>) -> Option<PathBuf> {
    let path = path?;
    if path.is_file() {
        Some(path.to_path_buf())
    } else {
        warnings.push(format!(
            "{} file not found: {} (using fallback)",
            kind,
            path.display()
        ));
        None
    }
}
