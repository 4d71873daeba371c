//! Probe errors.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a media file into a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The analyzer binary could not be located or spawned.
    #[error("{tool} not found (is it installed and on PATH?)")]
    ToolNotFound { tool: String },

    /// The analyzer ran but exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    /// The analyzer output was not in the expected shape.
    #[error("unexpected {tool} output: {message}")]
    InvalidOutput { tool: String, message: String },

    #[error("media file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed analyzer JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn invalid_output(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOutput {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// True when retrying with a different binary path could help.
    pub fn is_missing_tool(&self) -> bool {
        matches!(self, Self::ToolNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::tool_not_found("mediainfo").to_string(),
            "mediainfo not found (is it installed and on PATH?)"
        );
        assert_eq!(
            Error::file_not_found("/x/a.mkv").to_string(),
            "media file not found: /x/a.mkv"
        );
        assert!(Error::tool_not_found("mediainfo").is_missing_tool());
        assert!(!Error::tool_failed("mediainfo", "boom").is_missing_tool());
    }
}
