//! Video codec label.
//!
//! The single decision table for codec labeling. Remux detection takes
//! priority over filename codec hints at every tier: a remux must never carry
//! a re-encode tag.

use tracing::debug;

/// Video codec label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VideoCodec {
    Av1,
    /// HEVC bitstream carried untouched from a disc.
    Hevc,
    /// HEVC from a non-remux source, named H265 in the file name.
    H265,
    X265,
    Vc1,
    Mpeg2,
    /// AVC bitstream carried untouched from a disc.
    Avc,
    X264,
    H264,
}

impl std::fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoCodec::Av1 => write!(f, "AV1"),
            VideoCodec::Hevc => write!(f, "HEVC"),
            VideoCodec::H265 => write!(f, "H265"),
            VideoCodec::X265 => write!(f, "x265"),
            VideoCodec::Vc1 => write!(f, "VC-1"),
            VideoCodec::Mpeg2 => write!(f, "MPEG-2"),
            VideoCodec::Avc => write!(f, "AVC"),
            VideoCodec::X264 => write!(f, "x264"),
            VideoCodec::H264 => write!(f, "H264"),
        }
    }
}

impl VideoCodec {
    /// Label used by the dotted grammar, which spells H.264/H.265 with a period.
    pub fn standard_label(&self) -> String {
        match self {
            VideoCodec::H264 => "H.264".to_string(),
            VideoCodec::H265 => "H.265".to_string(),
            other => other.to_string(),
        }
    }
}

/// Whether a source label or file name marks a remux.
///
/// File names are compared with dots removed so `Blu.Ray.REMUX` and
/// `BluRayRemux` both match.
pub fn is_remux(file_name: &str, source: &str) -> bool {
    source.to_lowercase().contains("remux") || squashed(file_name).contains("remux")
}

fn squashed(file_name: &str) -> String {
    file_name.to_lowercase().replace('.', "")
}

/// Resolve the video codec label. First match wins.
pub fn resolve(video_format: &str, codec_id: &str, file_name: &str, source: &str) -> VideoCodec {
    let format = video_format.to_uppercase();
    let name = squashed(file_name);
    let remux = is_remux(file_name, source);

    let codec = if format.contains("AV1") {
        VideoCodec::Av1
    } else if format.contains("HEVC") {
        if remux {
            VideoCodec::Hevc
        } else if name.contains("h265") || name.contains("hevc") {
            VideoCodec::H265
        } else {
            VideoCodec::X265
        }
    } else if format.contains("VC-1") {
        VideoCodec::Vc1
    } else if codec_id.to_uppercase().contains("MPEG2") {
        VideoCodec::Mpeg2
    } else if remux {
        VideoCodec::Avc
    } else if name.contains("x264") {
        VideoCodec::X264
    } else {
        VideoCodec::H264
    };

    debug!(video_format, codec_id, remux, %codec, "resolved video codec");
    codec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn av1_first() {
        assert_eq!(resolve("AV1", "V_AV1", "x265.remux.mkv", "Remux"), VideoCodec::Av1);
    }

    #[test]
    fn hevc_remux_overrides_filename_hint() {
        let codec = resolve("HEVC", "V_MPEGH/ISO/HEVC", "Movie.2019.x265-GRP.mkv", "Bluray Remux");
        assert_eq!(codec, VideoCodec::Hevc);
    }

    #[test]
    fn hevc_remux_from_file_name() {
        let codec = resolve("HEVC", "", "Movie.2019.BluRay.REMUX.mkv", "BluRay");
        assert_eq!(codec, VideoCodec::Hevc);
    }

    #[test]
    fn hevc_h265_hint() {
        assert_eq!(resolve("HEVC", "", "Show.S01E01.H.265-GRP.mkv", "WEB-DL"), VideoCodec::H265);
        assert_eq!(resolve("HEVC", "", "Show.S01E01.HEVC-GRP.mkv", "WEB-DL"), VideoCodec::H265);
    }

    #[test]
    fn hevc_defaults_to_x265() {
        assert_eq!(resolve("HEVC", "", "Movie.2019.1080p.mkv", "BluRay"), VideoCodec::X265);
    }

    #[test]
    fn vc1_and_mpeg2() {
        assert_eq!(resolve("VC-1", "V_MS/VFW/FOURCC / WVC1", "a.mkv", "Remux"), VideoCodec::Vc1);
        assert_eq!(resolve("MPEG Video", "V_MPEG2", "a.mkv", "Remux"), VideoCodec::Mpeg2);
    }

    #[test]
    fn avc_remux_then_x264_then_default() {
        assert_eq!(resolve("AVC", "V_MPEG4/ISO/AVC", "a.x264.mkv", "BluRay Remux"), VideoCodec::Avc);
        assert_eq!(resolve("AVC", "V_MPEG4/ISO/AVC", "a.x264.mkv", "BluRay"), VideoCodec::X264);
        assert_eq!(resolve("AVC", "V_MPEG4/ISO/AVC", "a.mkv", "WEB-DL"), VideoCodec::H264);
    }

    #[test]
    fn standard_labels() {
        assert_eq!(VideoCodec::H264.standard_label(), "H.264");
        assert_eq!(VideoCodec::H265.standard_label(), "H.265");
        assert_eq!(VideoCodec::X265.standard_label(), "x265");
        assert_eq!(VideoCodec::H265.to_string(), "H265");
    }
}
