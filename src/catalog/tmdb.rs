//! TMDB (The Movie Database) catalog client.
//!
//! - Token-bucket rate limiting at 4 requests / second via [`governor`].
//! - 30-second request timeout.
//! - Search hits are accepted by title similarity, first match wins.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use releaseforge_naming::CatalogRecord;
use serde::Deserialize;
use tracing::{debug, info};

use super::similarity::similarity;
use super::CatalogService;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(4) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_THRESHOLD: f64 = 85.0;

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchResult>,
}

/// Movie hits carry `title`, TV hits carry `name`.
#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: u64,
    title: Option<String>,
    original_title: Option<String>,
    name: Option<String>,
    original_name: Option<String>,
}

impl TmdbSearchResult {
    fn candidates(&self, is_movie: bool) -> [Option<&str>; 2] {
        if is_movie {
            [self.title.as_deref(), self.original_title.as_deref()]
        } else {
            [self.name.as_deref(), self.original_name.as_deref()]
        }
    }
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetail {
    title: Option<String>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvDetail {
    name: Option<String>,
    first_air_date: Option<String>,
}

/// TMDB v3 client.
///
/// ```no_run
/// use releaseforge::catalog::TmdbCatalog;
///
/// let catalog = TmdbCatalog::new("your-api-key", "en-US")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct TmdbCatalog {
    client: reqwest::Client,
    api_key: String,
    language: String,
    base_url: String,
    threshold: f64,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl TmdbCatalog {
    /// Fails when `api_key` is empty: every TMDB call needs one.
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> anyhow::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            anyhow::bail!("TMDB API key required: set catalog.tmdb_api_key in the config file");
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            language: language.into(),
            base_url: TMDB_BASE_URL.to_string(),
            threshold: DEFAULT_THRESHOLD,
            rate_limiter: RateLimiter::direct(Quota::per_second(REQUESTS_PER_SECOND)),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Minimum similarity (percent) a search hit must exceed.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        self.rate_limiter.until_ready().await;

        // reqwest errors carry the full URL, api_key included
        self.client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("TMDB request failed: {}", redact(url)))?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("TMDB request returned error: {}", redact(url)))?
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to parse TMDB response: {}", redact(url)))
    }

    /// Build a full API URL with the API key and language query parameters.
    fn url(&self, path: &str, extra_params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{path}?api_key={}&language={}",
            self.base_url,
            urlencoded(&self.api_key),
            urlencoded(&self.language)
        );
        for (key, value) in extra_params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoded(value));
        }
        url
    }

    /// Identifier of the first result whose best title similarity exceeds
    /// the threshold.
    pub async fn find_id(&self, title: &str, is_movie: bool) -> anyhow::Result<Option<u64>> {
        let path = if is_movie { "/search/movie" } else { "/search/tv" };
        let url = self.url(path, &[("query", title)]);
        debug!(url = %redact(&url), "TMDB search");

        let body: TmdbSearchResponse = self.get(&url).await?;
        for result in &body.results {
            let score = result
                .candidates(is_movie)
                .into_iter()
                .flatten()
                .map(|candidate| similarity(title, candidate))
                .fold(f64::NEG_INFINITY, f64::max);
            debug!(id = result.id, score, "comparing search result");
            if score > self.threshold {
                info!(id = result.id, score, "TMDB match found");
                return Ok(Some(result.id));
            }
        }
        info!(title, results = body.results.len(), "no TMDB result above threshold");
        Ok(None)
    }
}

/// Hide the API key in logged URLs.
fn redact(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let value_start = start + "api_key=".len();
            let end = url[value_start..]
                .find('&')
                .map_or(url.len(), |i| value_start + i);
            format!("{}***{}", &url[..value_start], &url[end..])
        }
        None => url.to_string(),
    }
}

/// Minimal percent-encoding for query parameter values.
fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0x0f) as usize]));
            }
        }
    }
    out
}

const HEX: [u8; 16] = *b"0123456789ABCDEF";

#[async_trait]
impl CatalogService for TmdbCatalog {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    async fn search(&self, title: &str, is_movie: bool) -> anyhow::Result<Option<CatalogRecord>> {
        match self.find_id(title, is_movie).await? {
            Some(id) => self.fetch_by_id(id, is_movie).await.map(Some),
            None => Ok(None),
        }
    }

    async fn fetch_by_id(&self, id: u64, is_movie: bool) -> anyhow::Result<CatalogRecord> {
        if is_movie {
            let url = self.url(&format!("/movie/{id}"), &[]);
            debug!(url = %redact(&url), "TMDB movie detail");
            let detail: TmdbMovieDetail = self.get(&url).await?;
            Ok(CatalogRecord {
                display_title: detail.title.unwrap_or_default(),
                release_date: detail.release_date,
                is_movie: true,
                country_code: None,
            })
        } else {
            let url = self.url(&format!("/tv/{id}"), &[]);
            debug!(url = %redact(&url), "TMDB TV detail");
            let detail: TmdbTvDetail = self.get(&url).await?;
            Ok(CatalogRecord {
                display_title: detail.name.unwrap_or_default(),
                release_date: detail.first_air_date,
                is_movie: false,
                country_code: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encoding() {
        assert_eq!(urlencoded("hello world"), "hello+world");
        assert_eq!(urlencoded("foo&bar"), "foo%26bar");
        assert_eq!(urlencoded("Amélie"), "Am%C3%A9lie");
    }

    #[test]
    fn url_building() {
        let catalog = TmdbCatalog::new("key", "en-US")
            .unwrap()
            .with_base_url("http://localhost:1234/");
        assert_eq!(
            catalog.url("/search/tv", &[("query", "The Office US")]),
            "http://localhost:1234/search/tv?api_key=key&language=en-US&query=The+Office+US"
        );
    }

    #[test]
    fn api_key_is_redacted() {
        assert_eq!(
            redact("http://x/search?api_key=secret&language=en"),
            "http://x/search?api_key=***&language=en"
        );
        assert_eq!(redact("http://x/movie/1?api_key=secret"), "http://x/movie/1?api_key=***");
        assert_eq!(redact("http://x/"), "http://x/");
    }

    #[test]
    fn empty_api_key_rejected() {
        let err = TmdbCatalog::new(" ", "en-US").err().unwrap();
        assert!(err.to_string().contains("TMDB API key required"));
    }

    #[test]
    fn search_candidates_by_kind() {
        let hit = TmdbSearchResult {
            id: 1,
            title: Some("Movie".into()),
            original_title: None,
            name: Some("Show".into()),
            original_name: Some("Original".into()),
        };
        assert_eq!(hit.candidates(true), [Some("Movie"), None]);
        assert_eq!(hit.candidates(false), [Some("Show"), Some("Original")]);
    }
}
