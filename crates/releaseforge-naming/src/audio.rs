//! Audio label from the primary audio track.
//!
//! The format comes from the commercial name when one is present, otherwise
//! from the technical tag. Channels are credited from the wider of the
//! delivered and original layouts.

use crate::types::AudioTrackInfo;
use tracing::debug;

/// Channel count split into main channels and LFE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channels {
    pub main: u32,
    pub lfe: bool,
}

impl std::fmt::Display for Channels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.main, u8::from(self.lfe))
    }
}

/// A resolved audio label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioLabel {
    /// Abbreviated format (e.g. "DDP", "DTS-HD MA"), or the raw tag when
    /// the format is not recognised.
    pub format: String,
    pub atmos: bool,
    pub channels: Option<Channels>,
    /// False when `format` is a raw tag fallback.
    pub recognized: bool,
}

impl std::fmt::Display for AudioLabel {
    /// Descriptive form: `DDP Atmos 5.1`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format)?;
        if self.atmos {
            f.write_str(" Atmos")?;
        }
        if let Some(channels) = self.channels {
            write!(f, " {}", channels)?;
        }
        Ok(())
    }
}

impl AudioLabel {
    /// Dotted form: `DDP5.1.Atmos`, `DTS-HD.MA7.1`.
    ///
    /// Spaces inside the format become dots (`DD 5.1` gives `DD5.1`), the
    /// channel count is appended without a separator and Atmos goes last, so
    /// every word of the extended form survives as its own dotted token.
    pub fn compact(&self) -> String {
        let mut out = self.format.replace(' ', ".");
        if let Some(channels) = self.channels {
            out.push_str(&channels.to_string());
        }
        if self.atmos {
            out.push_str(".Atmos");
        }
        out
    }
}

fn commercial_format(commercial: &str) -> Option<&'static str> {
    // Longer names first: "Dolby Digital Plus" contains "Dolby Digital".
    if commercial.contains("Dolby Digital Plus") {
        Some("DDP")
    } else if commercial.contains("Dolby Digital") {
        Some("DD")
    } else if commercial.contains("TrueHD") {
        Some("TrueHD")
    } else if commercial.contains("DTS-HD Master Audio") {
        Some("DTS-HD MA")
    } else if commercial.contains("DTS-HD High Resolution") {
        Some("DTS-HD HR")
    } else if commercial.contains("DTS-ES") {
        Some("DTS-ES")
    } else if commercial.contains("DTS") {
        Some("DTS")
    } else {
        None
    }
}

fn technical_format(track: &AudioTrackInfo) -> Option<&'static str> {
    let format = track.format.as_deref().unwrap_or_default();
    let mapped = match format {
        "E-AC-3" => Some("EAC3"),
        "MLP FBA" => Some("TrueHD"),
        "DTS" => Some("DTS"),
        "AAC" => Some("AAC"),
        "PCM" => Some("PCM"),
        "AC-3" => Some("DD"),
        "FLAC" => Some("FLAC"),
        "Opus" => Some("OPUS"),
        _ => None,
    };
    if mapped.is_some() {
        return mapped;
    }

    if format == "MPEG Audio" && track.format_profile.as_deref() == Some("Layer 3") {
        Some("MP3")
    } else if track.endianness.as_deref() == Some("Little") {
        Some("LPCM")
    } else if format.contains("Vorbis") {
        Some("Vorbis")
    } else {
        None
    }
}

fn channels(track: &AudioTrackInfo) -> Option<Channels> {
    let count = match (track.channels, track.channels_original) {
        (Some(a), Some(b)) => a.max(b),
        (a, b) => a.or(b)?,
    };
    let layout = track
        .channel_layout_original
        .as_deref()
        .or(track.channel_layout.as_deref())
        .unwrap_or_default();

    if layout.contains("LFE") {
        Some(Channels {
            main: count.saturating_sub(1),
            lfe: true,
        })
    } else {
        Some(Channels {
            main: count,
            lfe: false,
        })
    }
}

/// Resolve the audio label for a track.
pub fn resolve(track: &AudioTrackInfo) -> AudioLabel {
    let commercial = track.commercial.as_deref().unwrap_or_default();
    let (format, atmos, recognized) = match commercial_format(commercial) {
        Some(format) => (format.to_string(), commercial.contains("Atmos"), true),
        None => match technical_format(track) {
            Some(format) => (format.to_string(), false, true),
            None => {
                let raw = track
                    .format
                    .clone()
                    .filter(|f| !f.is_empty())
                    .unwrap_or_else(|| "Audio".to_string());
                (raw, false, false)
            }
        },
    };

    let label = AudioLabel {
        format,
        atmos,
        channels: channels(track),
        recognized,
    };
    debug!(audio = %label, recognized, "resolved audio label");
    label
}
