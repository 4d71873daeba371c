//! Batch path lists.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Read from the working directory when no paths are given on the command line.
pub const BULK_FILE: &str = "bulkProcess.txt";

/// Parse a path list: one path per line, double quotes stripped, blank lines
/// skipped, sorted.
pub fn parse_path_list(content: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = content
        .lines()
        .map(|line| line.trim().replace('"', ""))
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();
    paths.sort();
    paths
}

/// Load the bulk list from `dir`. A missing file is created empty so the
/// user has somewhere to put paths; an empty list is an error.
pub fn load_bulk_file(dir: &Path) -> Result<Vec<PathBuf>> {
    let path = dir.join(BULK_FILE);
    if !path.exists() {
        tracing::warn!("No {} found, creating an empty one at {:?}", BULK_FILE, path);
        std::fs::write(&path, "").with_context(|| format!("Failed to create {:?}", path))?;
    }

    let content =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    let paths = parse_path_list(&content);
    if paths.is_empty() {
        anyhow::bail!("No paths given on the command line or in {:?}", path);
    }

    tracing::info!("Loaded {} paths from {}", paths.len(), BULK_FILE);
    Ok(paths)
}
