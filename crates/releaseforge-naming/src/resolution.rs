//! Resolution label from pixel dimensions.

use crate::error::{NamingError, Result};
use tracing::{debug, info};

/// Canonical height for commonly reported widths.
///
/// Encodes of cropped or pillarboxed masters report odd heights but keep the
/// width of their intended standard.
fn height_for_width(width: u32) -> Option<u32> {
    match width {
        720 => Some(576),
        960 => Some(540),
        1280 => Some(720),
        1920 => Some(1080),
        4096 | 3840 => Some(2160),
        692 => Some(480),
        1024 => Some(576),
        _ => None,
    }
}

const ACCEPTED_HEIGHTS: [u32; 8] = [576, 480, 360, 240, 720, 1080, 1440, 2160];

/// A resolved resolution such as `1080p` or `576i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub height: u32,
    pub interlaced: bool,
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scan = if self.interlaced { 'i' } else { 'p' };
        write!(f, "{}{}", self.height, scan)
    }
}

/// Resolve a resolution label.
///
/// The width table wins over the raw height. A 576-line mapping at an NTSC
/// frame rate (one containing "29") is really 480-line content.
pub fn resolve(
    width: Option<u32>,
    height: Option<u32>,
    frame_rate: Option<&str>,
    interlaced: bool,
) -> Result<Resolution> {
    let mapped = width.and_then(height_for_width).map(|mapped| {
        if mapped == 576 && frame_rate.is_some_and(|fr| fr.contains("29")) {
            info!("NTSC detected, using 480 lines");
            480
        } else {
            mapped
        }
    });

    let height = mapped
        .or_else(|| height.filter(|h| ACCEPTED_HEIGHTS.contains(h)))
        .ok_or(NamingError::UnresolvableResolution { width, height })?;

    let resolution = Resolution { height, interlaced };
    debug!(?width, ?frame_rate, %resolution, "resolved resolution");
    Ok(resolution)
}
