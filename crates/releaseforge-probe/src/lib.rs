//! # releaseforge-probe
//!
//! Turns a media file into a [`releaseforge_naming::MediaDescriptor`] by
//! running MediaInfo and reading its JSON report.
//!
//! ```no_run
//! use releaseforge_probe::{MediaInfoProber, MediaProber};
//! use std::path::Path;
//!
//! let media = MediaInfoProber::new().probe(Path::new("/media/movie.mkv"))?;
//! println!("{:?} x {:?}", media.width, media.height);
//! # Ok::<(), releaseforge_probe::Error>(())
//! ```

mod error;
mod mediainfo;
mod prober;
mod tools;

pub use error::{Error, Result};
pub use mediainfo::{descriptor_from_json, MediaInfoProber};
pub use prober::{MediaProber, StaticProber};
pub use tools::{check_tool, check_tools, resolve_tool, ToolInfo, MEDIAINFO};
