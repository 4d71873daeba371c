//! The name engine: composes every resolver into one release name.

use crate::audio::{self, AudioLabel};
use crate::codec::{self, VideoCodec};
use crate::colour::{self, ColourSpace};
use crate::error::{NamingError, NamingWarning, Result};
use crate::group::{clean_group, GroupPolicy, GroupVerdict, VideoCategory};
use crate::hints::FilenameHints;
use crate::language;
use crate::resolution;
use crate::sanitize::sanitize;
use crate::types::{
    CatalogRecord, EpisodeInfo, FormatVariant, MediaDescriptor, ReleaseName, ReleaseOptions,
};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

const FALLBACK_GROUP: &str = "NOGRP";

/// Every intermediate label that went into a name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Labels {
    pub title: String,
    pub year: String,
    pub episode: Option<EpisodeInfo>,
    pub resolution: String,
    pub source: String,
    pub codec: VideoCodec,
    pub audio: Option<AudioLabel>,
    pub colour_space: ColourSpace,
    pub language: String,
    pub group: GroupVerdict,
    pub edition: Option<String>,
    pub repack: bool,
}

/// A derived name plus the advisory results gathered on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Derivation {
    pub name: ReleaseName,
    pub labels: Labels,
    pub warnings: Vec<NamingWarning>,
}

impl Derivation {
    /// The banned-group warning, if any. Upload steps must stop on this.
    pub fn banned_group(&self) -> Option<&NamingWarning> {
        self.warnings.iter().find(|w| w.is_banned_group())
    }
}

/// Derives release names.
///
/// Holds only the immutable group policy, so one engine can be shared across
/// threads and called for any number of files.
#[derive(Debug, Clone, Default)]
pub struct NameEngine {
    policy: GroupPolicy,
}

impl NameEngine {
    pub fn new(policy: GroupPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GroupPolicy {
        &self.policy
    }

    /// Derive the release name for one file.
    ///
    /// `episode` supplies season/episode markers for series; when absent they
    /// are read from the file name. Fails only when a required field can
    /// neither be derived nor taken from `opts`.
    pub fn derive(
        &self,
        media: &MediaDescriptor,
        catalog: &CatalogRecord,
        opts: &ReleaseOptions,
        episode: Option<&EpisodeInfo>,
    ) -> Result<Derivation> {
        let hints = FilenameHints::parse(&media.file_name);
        let mut warnings = Vec::new();

        let mut title = catalog.display_title.replace(':', "");
        if catalog.is_movie {
            if let Some(country) = non_empty(catalog.country_code.as_deref()) {
                title.push(' ');
                title.push_str(country);
            }
        }

        let year = catalog_year(catalog.release_date.as_deref(), &mut warnings);

        let episode = if catalog.is_movie {
            None
        } else {
            let info = episode
                .cloned()
                .or_else(|| hints.episode_info())
                .ok_or(NamingError::missing("season"))?;
            if opts.per_episode && info.episode.is_none() {
                return Err(NamingError::missing("episode"));
            }
            Some(info)
        };

        let resolution = match non_empty(opts.resolution.as_deref()) {
            Some(res) => res.to_string(),
            None => resolution::resolve(
                media.width,
                media.height,
                media.frame_rate.as_deref(),
                media.interlaced,
            )?
            .to_string(),
        };

        let source = opts.source_label.trim().to_string();
        let codec = codec::resolve(
            &media.video_format,
            &media.video_codec_id,
            &media.file_name,
            &source,
        );

        let audio = match &media.audio {
            Some(track) => {
                let label = audio::resolve(track);
                if !label.recognized {
                    warn!(tag = %label.format, "unknown audio format");
                    warnings.push(NamingWarning::UnknownAudioFormat {
                        tag: label.format.clone(),
                    });
                }
                Some(label)
            }
            None => {
                warn!(file = %media.file_name, "no audio track found");
                warnings.push(NamingWarning::NoAudioTrack);
                None
            }
        };

        let colour_space = colour::resolve(media);

        let language = match non_empty(opts.language.as_deref()) {
            Some(lang) => lang.to_string(),
            None => media
                .audio
                .as_ref()
                .and_then(|a| a.language.as_deref())
                .map(language::resolve)
                .unwrap_or_default(),
        };
        if language.is_empty() && opts.format_variant == FormatVariant::ExtendedTrackerFormat {
            return Err(NamingError::missing("language"));
        }

        let group_name = opts
            .release_group
            .as_deref()
            .and_then(clean_group)
            .or_else(|| hints.release_group.clone())
            .unwrap_or_else(|| FALLBACK_GROUP.to_string());
        let category = VideoCategory::classify(&source, &media.file_name);
        let group = self.policy.evaluate(&group_name, category);
        if !group.allowed {
            warnings.push(NamingWarning::BannedGroup {
                group: group.group.clone(),
                category,
            });
        }

        let labels = Labels {
            title,
            year,
            episode,
            resolution,
            source,
            codec,
            audio,
            colour_space,
            language,
            group,
            edition: non_empty(opts.edition.as_deref()).map(str::to_string),
            repack: opts.repack || hints.repack,
        };
        debug!(?labels, "resolved labels");

        let extension = container_extension(&opts.container_extension);
        let raw = match opts.format_variant {
            FormatVariant::Standard => assemble_standard(&labels, extension),
            FormatVariant::ExtendedTrackerFormat => assemble_extended(&labels, extension),
        };
        let name = sanitize(&raw);
        info!(name = %name, variant = %opts.format_variant, "derived release name");

        Ok(Derivation {
            name,
            labels,
            warnings,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Four-digit year of a `YYYY-MM-DD` date; empty when absent or malformed.
fn catalog_year(date: Option<&str>, warnings: &mut Vec<NamingWarning>) -> String {
    let Some(date) = non_empty(date) else {
        return String::new();
    };
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => format!("{:04}", parsed.year()),
        Err(e) => {
            warn!(date, error = %e, "malformed catalog release date");
            warnings.push(NamingWarning::MalformedCatalogDate {
                value: date.to_string(),
            });
            String::new()
        }
    }
}

fn container_extension(ext: &str) -> &str {
    match ext.trim().trim_start_matches('.') {
        "" => "mkv",
        ext => ext,
    }
}

/// `Title.Year.[SxxEyy.[EpTitle.]][Edition.][REPACK.]Res.Source.Audio.Codec-Group.ext`
fn assemble_standard(labels: &Labels, extension: &str) -> String {
    let mut parts = vec![labels.title.clone(), labels.year.clone()];
    if let Some(episode) = &labels.episode {
        parts.push(episode.marker());
        parts.extend(episode.episode_title.clone());
    }
    parts.extend(labels.edition.clone());
    if labels.repack {
        parts.push("REPACK".to_string());
    }
    parts.push(labels.resolution.clone());
    parts.push(labels.source.clone());
    parts.extend(labels.audio.as_ref().map(AudioLabel::compact));
    parts.push(labels.codec.standard_label());

    let body = parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(".");
    fold_standard(&format!("{}-{}.{}", body, labels.group.group, extension))
}

/// Spaces become dots; apostrophes and `é` are dropped; runs of dots and
/// hyphens collapse to one.
fn fold_standard(name: &str) -> String {
    let mut out: String = name
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | 'é'))
        .map(|c| if c == ' ' { '.' } else { c })
        .collect();
    while out.contains("..") {
        out = out.replace("..", ".");
    }
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    out
}

/// `Title (Year)[ - SxxEyy[ - EpTitle]][ Edition] (Res Source Codec Colour Audio Lang - Group)[ [REPACK]].ext`
fn assemble_extended(labels: &Labels, extension: &str) -> String {
    let mut head = labels.title.clone();
    if !labels.year.is_empty() {
        head.push_str(&format!(" ({})", labels.year));
    }
    if let Some(episode) = &labels.episode {
        head.push_str(" - ");
        head.push_str(&episode.marker());
        if let Some(title) = non_empty(episode.episode_title.as_deref()) {
            head.push_str(" - ");
            head.push_str(title);
        }
    }
    if let Some(edition) = &labels.edition {
        head.push(' ');
        head.push_str(edition);
    }

    let details = [
        labels.resolution.clone(),
        labels.source.clone(),
        labels.codec.to_string(),
        labels.colour_space.to_string(),
        labels.audio.as_ref().map(ToString::to_string).unwrap_or_default(),
        labels.language.clone(),
    ]
    .into_iter()
    .filter(|d| !d.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    let mut name = format!("{} ({} - {})", head, details, labels.group.display_tag);
    if labels.repack {
        name.push_str(" [REPACK]");
    }
    name.push('.');
    name.push_str(extension);
    name
}
