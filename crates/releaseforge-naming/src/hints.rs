//! Hints guessed from a raw release file name.
//!
//! A small deterministic tokenizer: enough to seed a catalog search and fill
//! defaults (group, container, season markers) without any I/O.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::EpisodeInfo;

static CONTAINER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.+)\.(mkv|mp4|m4v|avi|m2ts|ts|mov|wmv|webm)$")
        .expect("container regex should compile")
});
/// Trailing `-GROUP` or `-[GROUP]`; the group itself holds no separators.
static GROUP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)-\[?([A-Za-z0-9][^\s.\-\[\]]*)\]?$").expect("group regex should compile")
});
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[(\[]?((?:19|20)\d{2})[)\]]?$").expect("year regex should compile")
});
static RESOLUTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d{3,4}[pi]$").expect("resolution regex should compile"));
static REPACK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:repack\d?|rerip|v[2-9])$").expect("repack regex should compile")
});
static EPISODE_TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^S\d{2}").expect("episode token regex should compile"));

const COUNTRIES: &[&str] = &["US", "UK", "GB", "AU", "NZ", "CA"];

/// Tokens that end the title part of a release name.
const QUALITY_TOKENS: &[&str] = &[
    "bluray", "blu-ray", "bdrip", "brrip", "bdremux", "remux", "uhd", "web", "web-dl", "webdl",
    "webrip", "hdtv", "dvdrip", "dvd", "hdrip", "x264", "x265", "h264", "h265", "hevc", "avc",
    "av1", "xvid", "hdr", "hdr10", "hdr10+", "dv", "dovi", "sdr", "10bit", "8bit", "repack",
    "proper", "rerip", "internal", "limited", "extended", "unrated", "remastered", "imax",
    "complete", "multi",
];

/// Values guessed from a file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilenameHints {
    pub title: String,
    pub year: Option<u16>,
    pub season: Option<String>,
    pub episode: Option<String>,
    pub episode_title: Option<String>,
    pub release_group: Option<String>,
    pub container: Option<String>,
    pub country: Option<String>,
    /// Source label such as `WEB-DL` or `BluRay Remux`.
    pub source: Option<String>,
    pub is_movie: bool,
    pub repack: bool,
}

impl FilenameHints {
    /// The year is the last year-like token before the first quality or
    /// episode token; earlier ones stay in the title (`Blade.Runner.2049.2017`).
    pub fn parse(file_name: &str) -> Self {
        let (stem, container) = split_container(file_name);
        let (body, release_group) = split_group(stem);
        let tokens = tokenize(body);

        let boundary = tokens
            .iter()
            .position(|t| is_episode_token(t) || is_quality(t))
            .unwrap_or(tokens.len());
        let title_year = tokens[..boundary]
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, t)| year_of(t).map(|y| (i, y)))
            .last();
        let (title_end, year) = match title_year {
            Some((i, year)) => (i, Some(year)),
            None => (boundary, tokens[boundary..].iter().find_map(|t| year_of(t))),
        };

        let mut title_tokens = &tokens[..title_end];
        let mut country = None;
        if let Some((last, rest)) = title_tokens.split_last() {
            if !rest.is_empty() && COUNTRIES.contains(last) {
                country = Some(last.to_string());
                title_tokens = rest;
            }
        }

        let markers = EpisodeInfo::from_file_name(body);
        let episode_title = markers
            .as_ref()
            .and_then(|m| m.episode.as_ref())
            .and_then(|_| episode_title(&tokens));

        Self {
            title: title_tokens.join(" "),
            year,
            season: markers.as_ref().map(|m| m.season.clone()),
            episode: markers.as_ref().and_then(|m| m.episode.clone()),
            episode_title,
            release_group,
            container,
            country,
            source: source_of(&tokens),
            is_movie: markers.is_none(),
            repack: tokens.iter().any(|t| REPACK_PATTERN.is_match(t)),
        }
    }

    /// Season and episode markers, if this is a series file.
    pub fn episode_info(&self) -> Option<EpisodeInfo> {
        self.season.as_ref().map(|season| EpisodeInfo {
            season: season.clone(),
            episode: self.episode.clone(),
            episode_title: self.episode_title.clone(),
        })
    }
}

fn tokenize(body: &str) -> Vec<&str> {
    body.split(['.', '_', ' ']).filter(|t| !t.is_empty()).collect()
}

fn split_container(file_name: &str) -> (&str, Option<String>) {
    match CONTAINER_PATTERN.captures(file_name) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(stem), Some(ext)) => (stem.as_str(), Some(ext.as_str().to_ascii_lowercase())),
            _ => (file_name, None),
        },
        None => (file_name, None),
    }
}

/// A group only follows the technical part of a name, so a hyphen inside a
/// bare title (`Spider-Man.mkv`) is not a group separator.
fn split_group(stem: &str) -> (&str, Option<String>) {
    let Some(caps) = GROUP_PATTERN.captures(stem) else {
        return (stem, None);
    };
    let (Some(body), Some(group)) = (caps.get(1), caps.get(2)) else {
        return (stem, None);
    };
    let (body, group) = (body.as_str(), group.as_str());

    let tokens = tokenize(body);
    // "WEB-DL" and "Blu-Ray" end in a source, not a group.
    let joined = format!("{}-{}", tokens.last().copied().unwrap_or_default(), group);
    let has_technical = tokens
        .iter()
        .enumerate()
        .any(|(i, t)| is_episode_token(t) || is_quality(t) || (i > 0 && year_of(t).is_some()));
    if is_quality(&joined) || !has_technical {
        return (stem, None);
    }
    (body, Some(group.to_string()))
}

fn year_of(token: &str) -> Option<u16> {
    YEAR_PATTERN
        .captures(token)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn is_episode_token(token: &str) -> bool {
    EPISODE_TOKEN_PATTERN.is_match(token)
}

fn is_quality(token: &str) -> bool {
    QUALITY_TOKENS.contains(&token.to_ascii_lowercase().as_str())
        || RESOLUTION_PATTERN.is_match(token)
}

fn episode_title(tokens: &[&str]) -> Option<String> {
    let start = tokens.iter().position(|t| is_episode_token(t))? + 1;
    let words: Vec<&str> = tokens[start..]
        .iter()
        .take_while(|t| !is_quality(t) && year_of(t).is_none() && !REPACK_PATTERN.is_match(t))
        .copied()
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

fn source_of(tokens: &[&str]) -> Option<String> {
    let lower: Vec<String> = tokens.iter().map(|t| t.to_ascii_lowercase()).collect();
    let has = |names: &[&str]| -> bool { lower.iter().any(|t| names.contains(&t.as_str())) };

    let base = if has(&["web-dl", "webdl"]) {
        "WEB-DL"
    } else if has(&["webrip"]) {
        "WEBRip"
    } else if has(&["web"]) {
        "WEB"
    } else if has(&["hdtv"]) {
        "HDTV"
    } else if has(&["bluray", "blu-ray", "bdrip", "brrip", "bdremux"]) {
        "BluRay"
    } else if has(&["dvdrip", "dvd"]) {
        "DVD"
    } else {
        return None;
    };

    if has(&["remux", "bdremux"]) {
        Some(format!("{} Remux", base))
    } else {
        Some(base.to_string())
    }
}
