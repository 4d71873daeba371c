//! Input and output types of the naming engine.
//!
//! All of these are built fresh per file and never mutated afterwards. The
//! engine only borrows them.

use once_cell::sync::Lazy;
use regex::Regex;

static EPISODE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)S(\d{2})E(\d{2})").expect("episode marker regex should compile")
});
static SEASON_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S(\d{2})").expect("season marker regex should compile"));

/// Technical facts about one media file, built once from prober output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaDescriptor {
    /// Base file name, used for codec and remux hints.
    pub file_name: String,
    /// Container-declared video format (e.g. "HEVC", "AVC", "VC-1").
    pub video_format: String,
    /// Low-level codec identifier (e.g. "V_MPEG2").
    pub video_codec_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Textual frame rate as reported (e.g. "23.976", "29.970").
    pub frame_rate: Option<String>,
    pub interlaced: bool,
    pub hdr_format: Option<String>,
    pub hdr_compatibility: Option<String>,
    pub colour_primaries: Option<String>,
    pub transfer_characteristics: Option<String>,
    /// Primary audio track: the first track of type Audio, if any.
    pub audio: Option<AudioTrackInfo>,
}

impl MediaDescriptor {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Set pixel dimensions, dropping non-positive values.
    pub fn with_dimensions(mut self, width: i64, height: i64) -> Self {
        self.width = positive(width);
        self.height = positive(height);
        self
    }

    pub fn with_video_format(mut self, format: impl Into<String>) -> Self {
        self.video_format = format.into();
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: impl Into<String>) -> Self {
        self.frame_rate = Some(frame_rate.into());
        self
    }

    pub fn with_audio(mut self, audio: AudioTrackInfo) -> Self {
        self.audio = Some(audio);
        self
    }
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Fields of the primary audio track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioTrackInfo {
    /// Technical format tag (e.g. "E-AC-3", "MLP FBA").
    pub format: Option<String>,
    /// Commercial name (e.g. "Dolby Digital Plus with Dolby Atmos").
    pub commercial: Option<String>,
    pub format_profile: Option<String>,
    pub endianness: Option<String>,
    pub channels: Option<u32>,
    pub channels_original: Option<u32>,
    pub channel_layout: Option<String>,
    pub channel_layout_original: Option<String>,
    /// ISO 639 language code, possibly with a region subtag.
    pub language: Option<String>,
}

/// Title facts from the external catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogRecord {
    pub display_title: String,
    /// ISO `YYYY-MM-DD` date, or empty.
    pub release_date: Option<String>,
    pub is_movie: bool,
    pub country_code: Option<String>,
}

impl CatalogRecord {
    pub fn movie(title: impl Into<String>, release_date: impl Into<String>) -> Self {
        Self {
            display_title: title.into(),
            release_date: Some(release_date.into()),
            is_movie: true,
            country_code: None,
        }
    }

    pub fn series(title: impl Into<String>, first_air_date: impl Into<String>) -> Self {
        Self {
            display_title: title.into(),
            release_date: Some(first_air_date.into()),
            is_movie: false,
            country_code: None,
        }
    }
}

/// Selects between the two naming grammars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FormatVariant {
    /// Dot-delimited compact grammar.
    #[default]
    Standard,
    /// Parenthesized descriptive grammar with colour space and language.
    ExtendedTrackerFormat,
}

impl std::fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatVariant::Standard => write!(f, "standard"),
            FormatVariant::ExtendedTrackerFormat => write!(f, "extended"),
        }
    }
}

impl std::str::FromStr for FormatVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "scene" => Ok(FormatVariant::Standard),
            "extended" | "huno" | "tracker" => Ok(FormatVariant::ExtendedTrackerFormat),
            _ => Err(format!("invalid format variant: {}", s)),
        }
    }
}

/// User-declared overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseOptions {
    /// Source label (e.g. "WEB-DL", "BluRay Remux"); may be empty.
    pub source_label: String,
    pub release_group: Option<String>,
    pub edition: Option<String>,
    pub repack: bool,
    pub format_variant: FormatVariant,
    pub container_extension: String,
    /// Display language to use when the audio track has none.
    pub language: Option<String>,
    /// Resolution label to use instead of resolving from dimensions.
    pub resolution: Option<String>,
    /// Require an episode number for series.
    pub per_episode: bool,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            source_label: String::new(),
            release_group: None,
            edition: None,
            repack: false,
            format_variant: FormatVariant::Standard,
            container_extension: "mkv".to_string(),
            language: None,
            resolution: None,
            per_episode: false,
        }
    }
}

/// Season and episode markers for a series file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeInfo {
    /// `S00` form.
    pub season: String,
    /// `E00` form.
    pub episode: Option<String>,
    pub episode_title: Option<String>,
}

impl EpisodeInfo {
    pub fn new(season: u32, episode: Option<u32>) -> Self {
        Self {
            season: format!("S{:02}", season),
            episode: episode.map(|e| format!("E{:02}", e)),
            episode_title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.episode_title = Some(title.into());
        self
    }

    /// Find `S00` and `S00E00` markers in a file name.
    ///
    /// Matching is case-insensitive; the stored markers are upper case.
    /// Returns `None` when no season marker is present.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        // A full S00E00 marker wins over an earlier bare S00.
        if let Some(caps) = EPISODE_MARKER.captures(file_name) {
            return Some(Self {
                season: format!("S{}", &caps[1]),
                episode: Some(format!("E{}", &caps[2])),
                episode_title: None,
            });
        }

        let caps = SEASON_MARKER.captures(file_name)?;
        Some(Self {
            season: format!("S{}", &caps[1]),
            episode: None,
            episode_title: None,
        })
    }

    /// `S01E02`, or `S01` for a season pack.
    pub fn marker(&self) -> String {
        match &self.episode {
            Some(episode) => format!("{}{}", self.season, episode),
            None => self.season.clone(),
        }
    }
}

/// The final name. Only constructible through [`crate::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReleaseName(pub(crate) String);

impl ReleaseName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ReleaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReleaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_drop_non_positive() {
        let media = MediaDescriptor::new("a.mkv").with_dimensions(1920, 0);
        assert_eq!(media.width, Some(1920));
        assert_eq!(media.height, None);

        let media = MediaDescriptor::new("a.mkv").with_dimensions(-1, 1080);
        assert_eq!(media.width, None);
        assert_eq!(media.height, Some(1080));
    }

    #[test]
    fn episode_from_file_name() {
        let info = EpisodeInfo::from_file_name("Show.s01e02.Pilot.720p.mkv").unwrap();
        assert_eq!(info.season, "S01");
        assert_eq!(info.episode.as_deref(), Some("E02"));
        assert_eq!(info.marker(), "S01E02");
    }

    #[test]
    fn season_pack_has_no_episode() {
        let info = EpisodeInfo::from_file_name("Show.S03.1080p.WEB-DL").unwrap();
        assert_eq!(info.season, "S03");
        assert_eq!(info.episode, None);
        assert_eq!(info.marker(), "S03");
    }

    #[test]
    fn full_marker_wins_over_bare_season() {
        let info = EpisodeInfo::from_file_name("S01ence.S02E05.mkv").unwrap();
        assert_eq!(info.season, "S02");
        assert_eq!(info.episode.as_deref(), Some("E05"));
    }

    #[test]
    fn no_season_marker() {
        assert!(EpisodeInfo::from_file_name("Inception.2010.1080p.mkv").is_none());
        assert!(EpisodeInfo::from_file_name("S1.mkv").is_none());
    }

    #[test]
    fn episode_info_new_pads() {
        let info = EpisodeInfo::new(1, Some(2)).with_title("Pilot");
        assert_eq!(info.marker(), "S01E02");
        assert_eq!(info.episode_title.as_deref(), Some("Pilot"));
    }

    #[test]
    fn format_variant_parse() {
        assert_eq!("extended".parse::<FormatVariant>(), Ok(FormatVariant::ExtendedTrackerFormat));
        assert_eq!("Standard".parse::<FormatVariant>(), Ok(FormatVariant::Standard));
        assert!("bogus".parse::<FormatVariant>().is_err());
    }
}
