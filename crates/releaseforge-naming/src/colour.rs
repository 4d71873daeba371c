//! Colour-space tier from HDR and Dolby Vision metadata.

use crate::types::MediaDescriptor;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColourSpace {
    Sdr,
    Hdr,
    Hdr10Plus,
    DolbyVision,
    DolbyVisionHdr,
    DolbyVisionHdr10Plus,
}

impl std::fmt::Display for ColourSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColourSpace::Sdr => write!(f, "SDR"),
            ColourSpace::Hdr => write!(f, "HDR"),
            ColourSpace::Hdr10Plus => write!(f, "HDR10+"),
            ColourSpace::DolbyVision => write!(f, "DV"),
            ColourSpace::DolbyVisionHdr => write!(f, "DV HDR"),
            ColourSpace::DolbyVisionHdr10Plus => write!(f, "DV HDR10+"),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Wide gamut primaries or a PQ/HLG transfer without explicit HDR fields.
fn signals_hdr(media: &MediaDescriptor) -> bool {
    let primaries = non_empty(&media.colour_primaries).unwrap_or_default();
    let transfer = non_empty(&media.transfer_characteristics).unwrap_or_default();
    primaries.contains("BT.2020")
        || primaries.contains("P3")
        || transfer.contains("PQ")
        || transfer.contains("SMPTE ST 2084")
        || transfer.contains("HLG")
}

/// Resolve the colour-space label.
pub fn resolve(media: &MediaDescriptor) -> ColourSpace {
    let format = non_empty(&media.hdr_format);
    let compat = non_empty(&media.hdr_compatibility);

    let colour = match (format, compat) {
        (None, None) if signals_hdr(media) => ColourSpace::Hdr,
        (None, None) => ColourSpace::Sdr,
        (format, compat) => {
            let format = format.unwrap_or_default();
            let compat = compat.unwrap_or_default();
            if format.contains("Dolby Vision") {
                if compat.contains("HDR10+") {
                    ColourSpace::DolbyVisionHdr10Plus
                } else if compat.contains("HDR10") {
                    ColourSpace::DolbyVisionHdr
                } else {
                    ColourSpace::DolbyVision
                }
            } else if compat.contains("HDR10+") || format.contains("HDR10+") {
                ColourSpace::Hdr10Plus
            } else {
                ColourSpace::Hdr
            }
        }
    };

    debug!(?format, ?compat, %colour, "resolved colour space");
    colour
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(format: Option<&str>, compat: Option<&str>) -> MediaDescriptor {
        MediaDescriptor {
            hdr_format: format.map(str::to_string),
            hdr_compatibility: compat.map(str::to_string),
            ..MediaDescriptor::new("a.mkv")
        }
    }

    #[test]
    fn sdr_without_indicators() {
        assert_eq!(resolve(&media(None, None)), ColourSpace::Sdr);
        let mut m = media(None, None);
        m.colour_primaries = Some("BT.709".into());
        assert_eq!(resolve(&m), ColourSpace::Sdr);
    }

    #[test]
    fn dolby_vision_tiers() {
        let m = media(Some("Dolby Vision, Version 1.0, dvhe.08.06, BL+RPU"), Some("HDR10+ Profile A"));
        assert_eq!(resolve(&m).to_string(), "DV HDR10+");

        let m = media(Some("Dolby Vision / SMPTE ST 2086"), Some("Blu-ray / HDR10"));
        assert_eq!(resolve(&m).to_string(), "DV HDR");

        let m = media(Some("Dolby Vision, Version 1.0, dvhe.05.06, BL+RPU"), None);
        assert_eq!(resolve(&m).to_string(), "DV");
    }

    #[test]
    fn hdr10_plus_and_generic_hdr() {
        let m = media(Some("SMPTE ST 2094 App 4"), Some("HDR10+ Profile B"));
        assert_eq!(resolve(&m).to_string(), "HDR10+");

        let m = media(Some("SMPTE ST 2086"), Some("HDR10"));
        assert_eq!(resolve(&m).to_string(), "HDR");
    }

    #[test]
    fn primaries_and_transfer_fallback() {
        let mut m = media(None, None);
        m.colour_primaries = Some("BT.2020".into());
        assert_eq!(resolve(&m), ColourSpace::Hdr);

        let mut m = media(None, None);
        m.transfer_characteristics = Some("HLG".into());
        assert_eq!(resolve(&m), ColourSpace::Hdr);

        let mut m = media(None, Some("  "));
        m.transfer_characteristics = Some("PQ".into());
        assert_eq!(resolve(&m), ColourSpace::Hdr);
    }
}
