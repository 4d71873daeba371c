use releaseforge_naming::{FormatVariant, GroupPolicy, VideoCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub groups: GroupsConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TMDB v3 API key. Only required when a lookup actually happens.
    #[serde(default)]
    pub tmdb_api_key: String,

    /// Language tag sent with every TMDB request.
    #[serde(default = "default_language")]
    pub language: String,

    /// Minimum title similarity, in percent, for a search hit to be accepted.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Override the API root (tests, proxies).
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: String::new(),
            language: default_language(),
            similarity_threshold: default_similarity_threshold(),
            base_url: None,
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_similarity_threshold() -> f64 {
    85.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamingConfig {
    /// `standard` or `extended`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Extension used when the file name has no recognizable container.
    #[serde(default = "default_container")]
    pub container: String,

    #[serde(default)]
    pub default_source: Option<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            container: default_container(),
            default_source: None,
        }
    }
}

impl NamingConfig {
    pub fn format_variant(&self) -> Result<FormatVariant, String> {
        self.format.parse()
    }
}

fn default_format() -> String {
    "standard".to_string()
}

fn default_container() -> String {
    "mkv".to_string()
}

/// Additions layered over the built-in banlist and collectives.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GroupsConfig {
    #[serde(default)]
    pub banned_web: Vec<String>,

    #[serde(default)]
    pub banned_remux: Vec<String>,

    #[serde(default)]
    pub banned_encode: Vec<String>,

    /// Collective name to member groups.
    #[serde(default)]
    pub collectives: BTreeMap<String, Vec<String>>,
}

impl GroupsConfig {
    /// The built-in policy with this section merged on top.
    pub fn policy(&self) -> GroupPolicy {
        let mut policy = GroupPolicy::builtin();
        policy.ban(VideoCategory::Web, self.banned_web.iter().cloned());
        policy.ban(VideoCategory::Remux, self.banned_remux.iter().cloned());
        policy.ban(VideoCategory::Encode, self.banned_encode.iter().cloned());
        for (name, members) in &self.collectives {
            policy.add_collective(name, members.iter().cloned());
        }
        policy
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub mediainfo_path: Option<PathBuf>,
}
