//! Release-group banlist and collective tagging.

use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Which banlist applies to a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VideoCategory {
    Web,
    Remux,
    Encode,
}

impl std::fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoCategory::Web => write!(f, "web"),
            VideoCategory::Remux => write!(f, "remux"),
            VideoCategory::Encode => write!(f, "encode"),
        }
    }
}

impl VideoCategory {
    /// Remux wins, then any WEB source, then encode.
    pub fn classify(source: &str, file_name: &str) -> Self {
        if crate::codec::is_remux(file_name, source) {
            VideoCategory::Remux
        } else if source.to_uppercase().contains("WEB") {
            VideoCategory::Web
        } else {
            VideoCategory::Encode
        }
    }
}

const BANNED_WEB: &[&str] = &["EVO"];

const BANNED_REMUX: &[&str] = &["4K4U"];

const BANNED_ENCODE: &[&str] = &[
    "Bearfish", "BiTOR", "BONE", "D3FiL3R", "d3g", "DTR", "ELiTE", "EVO", "eztv", "EzzRips",
    "HashMiner", "HETeam", "HEVCBay", "HiQVE", "HR-DR", "iFT", "ION265", "JATT", "Joy", "LAMA",
    "m3th", "MeGusta", "MRN", "Musafirboy", "PHOCiS", "PSA", "RARBG", "RMTeam", "ShieldBearer",
    "SiQ", "TBD", "TSP", "VXT", "YAWNiX", "YIFY", "YTS",
];

const COLLECTIVES: &[(&str, &[&str])] = &[
    ("HONE", &["Weasley", "Yogi", "cYpHer", "DiscoD", "Yoyo"]),
    (
        "QxR",
        &[
            "r00t", "Tigole", "FreetheFish", "MONOLITH", "ImE", "afm72", "Silence", "RZeroX",
            "Natty", "Ghost", "SAMPA", "Panda", "RCVR", "t3nzin", "Kappa", "LION",
        ],
    ),
    (
        "TAoE",
        &[
            "Goki", "JBENT", "Erie", "DNU", "DrainedDay", "DUHiT", "r0b0t", "WEM", "xtrem3x",
            "Frys", "Ainz", "Species180", "TheSickle", "ArcX", "HxD",
        ],
    ),
    ("UTR", &["ByteShare"]),
];

/// Outcome of evaluating a group against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupVerdict {
    pub group: String,
    pub category: VideoCategory,
    pub allowed: bool,
    pub collective: Option<String>,
    /// `"{group} {collective}"` for collective members, else the group.
    pub display_tag: String,
}

/// Static banlist and collective mapping.
///
/// Matching is case-insensitive. The policy is immutable once built and can
/// be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPolicy {
    banned: BTreeMap<VideoCategory, Vec<String>>,
    collectives: BTreeMap<String, Vec<String>>,
}

impl Default for GroupPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GroupPolicy {
    /// A policy with no banned groups and no collectives.
    pub fn empty() -> Self {
        Self {
            banned: BTreeMap::new(),
            collectives: BTreeMap::new(),
        }
    }

    /// The tracker's published banlist and known collectives.
    pub fn builtin() -> Self {
        let mut policy = Self::empty();
        policy.ban(VideoCategory::Web, BANNED_WEB.iter().copied());
        policy.ban(VideoCategory::Remux, BANNED_REMUX.iter().copied());
        policy.ban(VideoCategory::Encode, BANNED_ENCODE.iter().copied());
        for (collective, members) in COLLECTIVES {
            policy.add_collective(collective, members.iter().copied());
        }
        policy
    }

    /// Add groups to a category's banlist.
    pub fn ban<I, S>(&mut self, category: VideoCategory, groups: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.banned.entry(category).or_default();
        for group in groups {
            let group = group.into();
            if !list.iter().any(|g| g.eq_ignore_ascii_case(&group)) {
                list.push(group);
            }
        }
    }

    /// Add members to a collective, creating it if needed.
    pub fn add_collective<I, S>(&mut self, collective: &str, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.collectives.entry(collective.to_string()).or_default();
        for member in members {
            let member = member.into();
            if !list.iter().any(|m| m.eq_ignore_ascii_case(&member)) {
                list.push(member);
            }
        }
    }

    pub fn is_banned(&self, group: &str, category: VideoCategory) -> bool {
        self.banned
            .get(&category)
            .is_some_and(|list| list.iter().any(|g| g.eq_ignore_ascii_case(group)))
    }

    pub fn collective_of(&self, group: &str) -> Option<&str> {
        self.collectives
            .iter()
            .find(|(_, members)| members.iter().any(|m| m.eq_ignore_ascii_case(group)))
            .map(|(name, _)| name.as_str())
    }

    /// Evaluate a group for a video category.
    pub fn evaluate(&self, group: &str, category: VideoCategory) -> GroupVerdict {
        let allowed = !self.is_banned(group, category);
        let collective = self.collective_of(group).map(str::to_string);
        let display_tag = match &collective {
            Some(name) => format!("{} {}", group, name),
            None => group.to_string(),
        };

        if allowed {
            debug!(group, %category, %display_tag, "group allowed");
        } else {
            warn!(group, %category, "group is banned for this category");
        }

        GroupVerdict {
            group: group.to_string(),
            category,
            allowed,
            collective,
            display_tag,
        }
    }
}

/// Extract a group name from raw text: brackets become spaces, first word wins.
pub fn clean_group(raw: &str) -> Option<String> {
    raw.replace(['[', ']', '{', '}', '(', ')'], " ")
        .split_whitespace()
        .next()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_categories() {
        assert_eq!(VideoCategory::classify("BluRay Remux", "a.mkv"), VideoCategory::Remux);
        assert_eq!(VideoCategory::classify("BluRay", "a.REMUX.mkv"), VideoCategory::Remux);
        assert_eq!(VideoCategory::classify("WEB-DL", "a.mkv"), VideoCategory::Web);
        assert_eq!(VideoCategory::classify("WEBRip", "a.mkv"), VideoCategory::Web);
        assert_eq!(VideoCategory::classify("BluRay", "a.mkv"), VideoCategory::Encode);
        assert_eq!(VideoCategory::classify("", "a.mkv"), VideoCategory::Encode);
    }

    #[test]
    fn banned_only_in_its_category() {
        let policy = GroupPolicy::builtin();
        assert!(!policy.evaluate("4K4U", VideoCategory::Remux).allowed);
        assert!(policy.evaluate("4K4U", VideoCategory::Encode).allowed);
        assert!(!policy.evaluate("EVO", VideoCategory::Web).allowed);
        assert!(!policy.evaluate("EVO", VideoCategory::Encode).allowed);
        assert!(policy.evaluate("EVO", VideoCategory::Remux).allowed);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let policy = GroupPolicy::builtin();
        assert!(!policy.evaluate("yify", VideoCategory::Encode).allowed);
        assert!(!policy.evaluate("RARBG", VideoCategory::Encode).allowed);
    }

    #[test]
    fn collective_member_gets_display_tag() {
        let policy = GroupPolicy::builtin();
        let verdict = policy.evaluate("Tigole", VideoCategory::Encode);
        assert!(verdict.allowed);
        assert_eq!(verdict.collective.as_deref(), Some("QxR"));
        assert_eq!(verdict.display_tag, "Tigole QxR");

        let verdict = policy.evaluate("ByteShare", VideoCategory::Web);
        assert_eq!(verdict.display_tag, "ByteShare UTR");
    }

    #[test]
    fn unknown_group_unchanged() {
        let verdict = GroupPolicy::builtin().evaluate("GRP", VideoCategory::Web);
        assert!(verdict.allowed);
        assert_eq!(verdict.collective, None);
        assert_eq!(verdict.display_tag, "GRP");
    }

    #[test]
    fn extending_the_policy() {
        let mut policy = GroupPolicy::empty();
        policy.ban(VideoCategory::Web, ["BadWeb"]);
        policy.add_collective("CREW", ["Alpha"]);
        policy.add_collective("CREW", ["alpha", "Beta"]);

        assert!(policy.is_banned("badweb", VideoCategory::Web));
        assert!(!policy.is_banned("4K4U", VideoCategory::Remux));
        assert_eq!(policy.evaluate("Beta", VideoCategory::Encode).display_tag, "Beta CREW");
        assert_eq!(policy.collectives["CREW"].len(), 2);
    }

    #[test]
    fn clean_group_strips_brackets() {
        assert_eq!(clean_group("[GRP]").as_deref(), Some("GRP"));
        assert_eq!(clean_group("GRP (2)").as_deref(), Some("GRP"));
        assert_eq!(clean_group(" {x} y").as_deref(), Some("x"));
        assert_eq!(clean_group("[]"), None);
    }
}
