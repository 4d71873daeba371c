//! Per-file naming: hints, catalog, probe and engine glued together, with
//! missing values filled in by a [`Prompter`].

use std::path::Path;

use anyhow::{Context, Result};
use releaseforge_naming::{
    CatalogRecord, Derivation, EpisodeInfo, FilenameHints, FormatVariant, NameEngine,
    NamingError, ReleaseOptions,
};
use releaseforge_probe::MediaProber;
use tracing::{info, warn};

use crate::catalog::CatalogService;
use crate::prompt::Prompter;

/// Each field can be asked for once per file.
const MAX_PROMPTS: usize = 4;

/// Everything the caller decided about a file before naming it.
#[derive(Debug, Clone, Default)]
pub struct NameRequest {
    /// Catalog identifier; skips the search.
    pub catalog_id: Option<u64>,
    /// Title and year given directly; skips the catalog entirely.
    pub title: Option<String>,
    pub year: Option<u16>,
    /// `Some(true)` forces movie, `Some(false)` forces series.
    pub is_movie: Option<bool>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub source: Option<String>,
    /// Used when neither the request nor the file name gives a source.
    pub default_source: Option<String>,
    pub group: Option<String>,
    pub edition: Option<String>,
    pub repack: bool,
    pub format_variant: FormatVariant,
    /// Used when the file name has no recognizable container.
    pub default_container: String,
    pub language: Option<String>,
    pub resolution: Option<String>,
    pub per_episode: bool,
}

/// Names files one at a time.
pub struct Namer<'a> {
    pub engine: &'a NameEngine,
    pub catalog: Option<&'a dyn CatalogService>,
    pub prober: &'a dyn MediaProber,
    pub prompter: &'a dyn Prompter,
}

impl Namer<'_> {
    pub async fn name_path(&self, path: &Path, request: &NameRequest) -> Result<Derivation> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Not a file path: {:?}", path))?;
        let hints = FilenameHints::parse(&file_name);
        tracing::debug!(?hints, "filename hints");

        let is_movie = request.is_movie.unwrap_or(hints.is_movie);
        let mut catalog = self.catalog_record(request, &hints, is_movie).await?;
        if is_movie {
            catalog.country_code = hints.country.clone();
        }
        info!(title = %catalog.display_title, date = ?catalog.release_date, "catalog record");

        let media = self
            .prober
            .probe(path)
            .with_context(|| format!("Failed to probe {:?}", path))?;

        let mut opts = ReleaseOptions {
            source_label: normalize_source(
                request
                    .source
                    .as_deref()
                    .or(request.default_source.as_deref())
                    .or(hints.source.as_deref())
                    .unwrap_or_default(),
            ),
            release_group: request.group.clone(),
            edition: request.edition.clone(),
            repack: request.repack,
            format_variant: request.format_variant,
            container_extension: hints
                .container
                .clone()
                .unwrap_or_else(|| request.default_container.clone()),
            language: request.language.clone(),
            resolution: request.resolution.clone(),
            per_episode: request.per_episode,
        };

        let mut episode = request.season.map(|season| {
            let mut info = EpisodeInfo::new(season, request.episode);
            if info.episode.is_none() {
                info.episode = hints.episode.clone();
            }
            info.episode_title = hints.episode_title.clone();
            info
        });

        for _ in 0..MAX_PROMPTS {
            match self.engine.derive(&media, &catalog, &opts, episode.as_ref()) {
                Ok(derivation) => return Ok(derivation),
                Err(err) => {
                    warn!(error = %err, "naming needs input");
                    let field = err.field();
                    let answer = self
                        .prompter
                        .ask(&format!("No {field} could be determined. Please input {field}"))?
                        .ok_or_else(|| anyhow::Error::new(err.clone()))
                        .with_context(|| format!("Cannot name {:?}", path))?;
                    fill_missing(&err, &answer, &mut opts, &mut episode, &hints)?;
                }
            }
        }
        anyhow::bail!("Cannot name {:?}: too many missing fields", path)
    }

    async fn catalog_record(
        &self,
        request: &NameRequest,
        hints: &FilenameHints,
        is_movie: bool,
    ) -> Result<CatalogRecord> {
        if let Some(title) = &request.title {
            let date = request.year.map(|y| format!("{:04}-01-01", y));
            return Ok(CatalogRecord {
                display_title: title.clone(),
                release_date: date,
                is_movie,
                country_code: None,
            });
        }

        let catalog = self.catalog.context(
            "TMDB API key required: set catalog.tmdb_api_key, or pass --title to skip the catalog",
        )?;

        if let Some(id) = request.catalog_id {
            return catalog.fetch_by_id(id, is_movie).await;
        }

        let mut query = hints.title.clone();
        if let Some(country) = &hints.country {
            query.push(' ');
            query.push_str(country);
        }
        info!(query = %query, catalog = catalog.name(), "No catalog ID given, searching");
        if let Some(record) = catalog.search(&query, is_movie).await? {
            return Ok(record);
        }

        let answer = self
            .prompter
            .ask("Failed to find TMDB ID. Please input")?
            .with_context(|| format!("No catalog match for {:?}", query))?;
        let id: u64 = answer
            .parse()
            .with_context(|| format!("Invalid TMDB ID: {}", answer))?;
        catalog.fetch_by_id(id, is_movie).await
    }
}

fn fill_missing(
    err: &NamingError,
    answer: &str,
    opts: &mut ReleaseOptions,
    episode: &mut Option<EpisodeInfo>,
    hints: &FilenameHints,
) -> Result<()> {
    match err.field() {
        "language" => opts.language = Some(answer.to_string()),
        "resolution" => opts.resolution = Some(answer.to_string()),
        "season" => {
            let season = parse_number(answer, 'S')?;
            let mut info = EpisodeInfo::new(season, None);
            info.episode = hints.episode.clone();
            info.episode_title = hints.episode_title.clone();
            *episode = Some(info);
        }
        "episode" => {
            let number = parse_number(answer, 'E')?;
            let mut info = episode
                .take()
                .or_else(|| hints.episode_info())
                .context("episode given without a season")?;
            info.episode = Some(format!("E{:02}", number));
            *episode = Some(info);
        }
        other => anyhow::bail!("Cannot supply a value for {}", other),
    }
    Ok(())
}

/// Accepts `3`, `03`, `S03` or `e03`.
fn parse_number(answer: &str, prefix: char) -> Result<u32> {
    let trimmed = answer.trim();
    let digits = trimmed
        .strip_prefix(prefix)
        .or_else(|| trimmed.strip_prefix(prefix.to_ascii_lowercase()))
        .unwrap_or(trimmed);
    digits
        .parse()
        .with_context(|| format!("Expected a number, got {:?}", answer))
}

/// `blu-ray` in any case becomes `BluRay`.
pub fn normalize_source(source: &str) -> String {
    let source = source.trim();
    let lower = source.to_ascii_lowercase();
    match lower.find("blu-ray") {
        Some(i) => format!("{}BluRay{}", &source[..i], &source[i + "blu-ray".len()..]),
        None => source.to_string(),
    }
}
