//! Final filesystem-safety pass over a derived name.

use crate::types::ReleaseName;

/// Characters reserved by common filesystems.
pub const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

fn is_stripped(c: char) -> bool {
    // C0, DEL and C1 are all `char::is_control`.
    RESERVED.contains(&c) || c.is_control()
}

/// Strip reserved and control characters.
///
/// Idempotent: the output never contains a character this would strip.
pub fn sanitize(name: &str) -> ReleaseName {
    ReleaseName(name.chars().filter(|c| !is_stripped(*c)).collect())
}
