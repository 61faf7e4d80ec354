// Injects a git-derived version string, falling back to the package
// version when git metadata is unavailable.

use std::process::Command;

fn main() {
    let version = git_describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=ALERTDECK_VERSION={version}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

/// `git describe` output, normalized: `v`-prefixed tags become the bare tag
/// version, anything else is appended to the package version.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    match described.strip_prefix('v') {
        Some(tag) => match tag.find('-') {
            Some(dash) => Some(tag[..dash].to_string()),
            None => Some(tag.to_string()),
        },
        None => Some(format!("{}-{}", env!("CARGO_PKG_VERSION"), described)),
    }
}
