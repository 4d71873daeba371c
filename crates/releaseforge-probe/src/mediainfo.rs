//! MediaInfo JSON output mapped into a [`MediaDescriptor`].
//!
//! The track array is scanned once: the first `Video` track and the first
//! `Audio` track are the primaries, everything else is ignored.

use crate::prober::MediaProber;
use crate::{Error, Result};
use releaseforge_naming::{AudioTrackInfo, MediaDescriptor};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct MediaInfoOutput {
    media: Option<MediaInfoMedia>,
}

#[derive(Debug, Deserialize)]
struct MediaInfoMedia {
    #[serde(default)]
    track: Vec<MediaInfoTrack>,
}

#[derive(Debug, Default, Deserialize)]
struct MediaInfoTrack {
    #[serde(rename = "@type")]
    track_type: String,
    #[serde(rename = "Format")]
    format: Option<String>,
    #[serde(rename = "Format_Commercial_IfAny")]
    format_commercial: Option<String>,
    #[serde(rename = "Format_Profile")]
    format_profile: Option<String>,
    #[serde(rename = "Format_Settings_Endianness")]
    endianness: Option<String>,
    #[serde(rename = "CodecID")]
    codec_id: Option<String>,
    #[serde(rename = "Width")]
    width: Option<String>,
    #[serde(rename = "Height")]
    height: Option<String>,
    #[serde(rename = "FrameRate")]
    frame_rate: Option<String>,
    #[serde(rename = "ScanType")]
    scan_type: Option<String>,
    #[serde(rename = "HDR_Format")]
    hdr_format: Option<String>,
    #[serde(rename = "HDR_Format_Compatibility")]
    hdr_format_compat: Option<String>,
    #[serde(rename = "colour_primaries")]
    colour_primaries: Option<String>,
    #[serde(rename = "transfer_characteristics")]
    transfer_characteristics: Option<String>,
    #[serde(rename = "Channels")]
    channels: Option<String>,
    #[serde(rename = "Channels_Original")]
    channels_original: Option<String>,
    #[serde(rename = "ChannelLayout")]
    channel_layout: Option<String>,
    #[serde(rename = "ChannelLayout_Original")]
    channel_layout_original: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
}

/// Build a descriptor from MediaInfo `--Output=JSON` text.
pub fn descriptor_from_json(file_name: &str, json: &str) -> Result<MediaDescriptor> {
    let output: MediaInfoOutput = serde_json::from_str(json)?;
    let tracks = output
        .media
        .ok_or_else(|| Error::invalid_output("mediainfo", "missing media object"))?
        .track;

    let mut media = MediaDescriptor::new(file_name);
    let mut video = None;
    let mut audio = None;
    for track in tracks {
        match track.track_type.as_str() {
            "Video" if video.is_none() => video = Some(track),
            "Audio" if audio.is_none() => audio = Some(track),
            _ => {}
        }
        if video.is_some() && audio.is_some() {
            break;
        }
    }

    match video {
        Some(track) => apply_video(&mut media, track),
        None => warn!(file = file_name, "no video track in mediainfo output"),
    }
    media.audio = audio.map(audio_info);

    debug!(file = file_name, ?media, "built media descriptor");
    Ok(media)
}

fn apply_video(media: &mut MediaDescriptor, track: MediaInfoTrack) {
    let width = track.width.as_deref().and_then(parse_numeric::<i64>);
    let height = track.height.as_deref().and_then(parse_numeric::<i64>);
    *media = std::mem::take(media).with_dimensions(width.unwrap_or(0), height.unwrap_or(0));

    media.video_format = track.format.unwrap_or_default();
    media.video_codec_id = track.codec_id.unwrap_or_default();
    media.frame_rate = track.frame_rate.filter(|f| !f.is_empty());
    media.interlaced = track
        .scan_type
        .as_deref()
        .is_some_and(|s| s.contains("Interlaced") || s.contains("MBAFF"));
    media.hdr_format = track.hdr_format;
    media.hdr_compatibility = track.hdr_format_compat;
    media.colour_primaries = track.colour_primaries;
    media.transfer_characteristics = track.transfer_characteristics;
}

fn audio_info(track: MediaInfoTrack) -> AudioTrackInfo {
    AudioTrackInfo {
        format: track.format,
        commercial: track.format_commercial,
        format_profile: track.format_profile,
        endianness: track.endianness,
        channels: track.channels.as_deref().and_then(parse_numeric),
        channels_original: track.channels_original.as_deref().and_then(parse_numeric),
        channel_layout: track.channel_layout,
        channel_layout_original: track.channel_layout_original,
        language: track.language,
    }
}

/// Parse a leading number, tolerating unit suffixes and digit grouping
/// (`"1 920 pixels"`, `"6 channels"`).
fn parse_numeric<T: std::str::FromStr>(s: &str) -> Option<T> {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ' ' || *c == '-')
        .filter(|c| *c != ' ')
        .collect();
    digits.parse().ok()
}

/// Runs the `mediainfo` CLI.
#[derive(Debug, Clone)]
pub struct MediaInfoProber {
    binary: PathBuf,
}

impl Default for MediaInfoProber {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaInfoProber {
    /// Use `mediainfo` from `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("mediainfo"),
        }
    }

    /// Use an explicit binary path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--Output=JSON")
            .arg(path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(self.binary.display().to_string())
                } else {
                    Error::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed("mediainfo", stderr.trim()));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::invalid_output("mediainfo", format!("invalid UTF-8: {}", e)))
    }
}

impl MediaProber for MediaInfoProber {
    fn name(&self) -> &'static str {
        "mediainfo"
    }

    fn supports(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn probe(&self, path: &Path) -> Result<MediaDescriptor> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(path = %path.display(), binary = %self.binary.display(), "running mediainfo");
        let json = self.run(path)?;
        descriptor_from_json(&file_name, &json)
    }
}
