//! Error and warning types for release-name derivation.

use crate::group::VideoCategory;

/// Result type alias using [`NamingError`].
pub type Result<T> = std::result::Result<T, NamingError>;

/// A classification input could not be derived and no override was given.
///
/// These are recoverable: the caller supplies the value (prompt, option or
/// default) and derives again. The engine never guesses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    /// A required field (`season`, `episode`, `language`) is missing.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// Pixel dimensions match neither the width table nor a standard height.
    #[error("cannot resolve resolution from {}x{}", fmt_dim(.width), fmt_dim(.height))]
    UnresolvableResolution {
        width: Option<u32>,
        height: Option<u32>,
    },
}

impl NamingError {
    /// Create a missing field error.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Name of the override that would resolve this error.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::UnresolvableResolution { .. } => "resolution",
        }
    }
}

fn fmt_dim(dim: &Option<u32>) -> String {
    dim.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Advisory results attached to a successful derivation.
///
/// None of these block naming. `BannedGroup` must be acted upon before any
/// upload step; the rest are informational.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum NamingWarning {
    /// The release group is on the banlist for this video category.
    BannedGroup {
        group: String,
        category: VideoCategory,
    },
    /// The catalog release date did not parse as `YYYY-MM-DD`; year left empty.
    MalformedCatalogDate { value: String },
    /// The media has no audio track; the audio label is empty.
    NoAudioTrack,
    /// The audio format tag is not in any known table; the raw tag was used.
    UnknownAudioFormat { tag: String },
}

impl std::fmt::Display for NamingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NamingWarning::BannedGroup { group, category } => {
                write!(f, "group '{}' is banned for {} releases", group, category)
            }
            NamingWarning::MalformedCatalogDate { value } => {
                write!(f, "catalog release date '{}' is malformed, year omitted", value)
            }
            NamingWarning::NoAudioTrack => write!(f, "no audio track found"),
            NamingWarning::UnknownAudioFormat { tag } => {
                write!(f, "unknown audio format '{}'", tag)
            }
        }
    }
}

impl NamingWarning {
    /// Whether this warning gates the upload path.
    pub fn is_banned_group(&self) -> bool {
        matches!(self, NamingWarning::BannedGroup { .. })
    }
}
