//! The [`MediaProber`] seam between files on disk and the naming engine.

use std::path::Path;

use releaseforge_naming::MediaDescriptor;

use crate::Result;

/// Extracts a [`MediaDescriptor`] from a media file.
///
/// Implementations must be shareable across threads.
pub trait MediaProber: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Analyze `path`.
    fn probe(&self, path: &Path) -> Result<MediaDescriptor>;

    /// Cheap pre-check. `true` does not guarantee [`MediaProber::probe`]
    /// will succeed.
    fn supports(&self, path: &Path) -> bool;
}

/// Serves descriptors from memory, keyed by file name. Useful where no
/// analyzer binary is installed.
#[derive(Debug, Default, Clone)]
pub struct StaticProber {
    entries: Vec<MediaDescriptor>,
}

impl StaticProber {
    pub fn new(entries: impl IntoIterator<Item = MediaDescriptor>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    fn lookup(&self, path: &Path) -> Option<&MediaDescriptor> {
        let name = path.file_name()?.to_string_lossy();
        self.entries.iter().find(|m| m.file_name == name)
    }
}

impl MediaProber for StaticProber {
    fn name(&self) -> &'static str {
        "static"
    }

    fn probe(&self, path: &Path) -> Result<MediaDescriptor> {
        self.lookup(path)
            .cloned()
            .ok_or_else(|| crate::Error::file_not_found(path))
    }

    fn supports(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }
}
