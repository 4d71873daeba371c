//! Placing a derived name on disk.

use anyhow::{Context, Result};
use releaseforge_naming::ReleaseName;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Move the source to the new name.
    Rename,
    /// Keep the source and add a hardlink under the new name.
    Hardlink,
}

impl std::fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyMode::Rename => write!(f, "rename"),
            ApplyMode::Hardlink => write!(f, "hardlink"),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Done(PathBuf),
    /// The destination already existed and was left untouched.
    Skipped(PathBuf),
}

/// Destination path: `name` in the source's directory.
pub fn destination(source: &Path, name: &ReleaseName) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(name.as_str())
}

/// Rename or hardlink `source` to `name` next to it. Never overwrites.
pub fn apply(source: &Path, name: &ReleaseName, mode: ApplyMode) -> Result<Applied> {
    let dest = destination(source, name);
    if dest.exists() {
        tracing::warn!("Destination already exists, skipping: {:?}", dest);
        return Ok(Applied::Skipped(dest));
    }

    match mode {
        ApplyMode::Rename => std::fs::rename(source, &dest),
        ApplyMode::Hardlink => std::fs::hard_link(source, &dest),
    }
    .with_context(|| format!("Failed to {} {:?} to {:?}", mode, source, dest))?;

    tracing::info!("{} made: {:?}", mode, dest);
    Ok(Applied::Done(dest))
}
