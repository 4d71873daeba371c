//! # releaseforge-naming
//!
//! Release-name derivation for private-tracker media packaging.
//!
//! Maps a file's technical metadata ([`MediaDescriptor`]), its catalog title
//! facts ([`CatalogRecord`]) and user overrides ([`ReleaseOptions`]) to a
//! single canonical [`ReleaseName`]. Everything here is pure: no I/O, no
//! global state, safe to call concurrently.
//!
//! ## Quick Start
//!
//! ```
//! use releaseforge_naming::{
//!     AudioTrackInfo, CatalogRecord, MediaDescriptor, NameEngine, ReleaseOptions,
//! };
//!
//! let media = MediaDescriptor::new("Inception.2010.1080p.BluRay-GRP.mkv")
//!     .with_video_format("AVC")
//!     .with_dimensions(1920, 1080)
//!     .with_audio(AudioTrackInfo {
//!         commercial: Some("Dolby Digital".into()),
//!         channels: Some(6),
//!         channel_layout: Some("L R C LFE Ls Rs".into()),
//!         ..Default::default()
//!     });
//! let catalog = CatalogRecord::movie("Inception", "2010-07-15");
//! let opts = ReleaseOptions {
//!     source_label: "BluRay".into(),
//!     release_group: Some("GRP".into()),
//!     ..Default::default()
//! };
//!
//! let derivation = NameEngine::default().derive(&media, &catalog, &opts, None)?;
//! assert_eq!(derivation.name.as_str(), "Inception.2010.1080p.BluRay.DD5.1.H.264-GRP.mkv");
//! # Ok::<(), releaseforge_naming::NamingError>(())
//! ```
//!
//! ## Grammars
//!
//! - [`FormatVariant::Standard`]: `Title.Year.Res.Source.Audio.Codec-Group.ext`
//! - [`FormatVariant::ExtendedTrackerFormat`]:
//!   `Title (Year) (Res Source Codec Colour Audio Language - Group).ext`

pub mod audio;
pub mod codec;
pub mod colour;
mod engine;
mod error;
pub mod group;
pub mod hints;
pub mod language;
pub mod resolution;
mod sanitize;
mod types;

pub use audio::{AudioLabel, Channels};
pub use codec::VideoCodec;
pub use colour::ColourSpace;
pub use engine::{Derivation, Labels, NameEngine};
pub use error::{NamingError, NamingWarning, Result};
pub use group::{GroupPolicy, GroupVerdict, VideoCategory};
pub use hints::FilenameHints;
pub use resolution::Resolution;
pub use sanitize::{sanitize, RESERVED};
pub use types::{
    AudioTrackInfo, CatalogRecord, EpisodeInfo, FormatVariant, MediaDescriptor, ReleaseName,
    ReleaseOptions,
};
