mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./releaseforge.toml",
        "./config.toml",
        "~/.config/releaseforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let threshold = config.catalog.similarity_threshold;
    if !(0.0..=100.0).contains(&threshold) {
        anyhow::bail!(
            "catalog.similarity_threshold must be between 0 and 100, got {}",
            threshold
        );
    }

    config
        .naming
        .format_variant()
        .map_err(anyhow::Error::msg)
        .context("Invalid naming.format")?;

    let container = config.naming.container.trim();
    if container.is_empty() {
        anyhow::bail!("naming.container cannot be empty");
    }
    if container.contains(['/', '\\']) {
        anyhow::bail!("naming.container cannot contain path separators: {}", container);
    }

    if let Some(path) = &config.tools.mediainfo_path {
        if !path.exists() {
            tracing::warn!("Configured mediainfo path does not exist: {:?}", path);
        }
    }

    Ok(())
}
