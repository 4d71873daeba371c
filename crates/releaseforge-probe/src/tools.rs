//! Locating the analyzer binary.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Binary name looked up on `PATH` when nothing is configured.
pub const MEDIAINFO: &str = "mediainfo";

/// Availability report for an external analyzer.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of `--version` output.
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

/// Run `<binary> --version` and report what came back.
///
/// ```no_run
/// let info = releaseforge_probe::check_tool("mediainfo");
/// if !info.available {
///     eprintln!("mediainfo is missing");
/// }
/// ```
pub fn check_tool(binary: impl AsRef<Path>) -> ToolInfo {
    let binary = binary.as_ref();
    let name = binary
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| binary.display().to_string());

    match Command::new(binary).arg("--version").output() {
        Ok(output) if output.status.success() => {
            // mediainfo prints a banner line before the version
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .last()
                .map(str::to_string);
            ToolInfo {
                name,
                available: true,
                version,
                path: which::which(binary).ok(),
            }
        }
        _ => ToolInfo {
            name,
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Every tool the probe layer can use.
pub fn check_tools(configured: Option<&Path>) -> Vec<ToolInfo> {
    vec![check_tool(configured.unwrap_or(Path::new(MEDIAINFO)))]
}

/// Resolve the analyzer path: an existing configured path wins, otherwise
/// `PATH` is searched.
pub fn resolve_tool(name: &str, configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "configured {} path does not exist, searching PATH", name);
    }
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_reports_unavailable() {
        let info = check_tool("releaseforge_missing_tool_12345");
        assert!(!info.available);
        assert_eq!(info.name, "releaseforge_missing_tool_12345");
        assert!(info.version.is_none());
    }

    #[test]
    fn configured_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("mediainfo");
        std::fs::write(&fake, b"").unwrap();
        assert_eq!(resolve_tool(MEDIAINFO, Some(&fake)).unwrap(), fake);
    }

    #[test]
    fn unresolvable_tool() {
        let err = resolve_tool("releaseforge_missing_tool_12345", None).unwrap_err();
        assert!(err.is_missing_tool());
    }
}
