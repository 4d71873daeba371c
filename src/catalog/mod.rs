//! Catalog lookups: canonical title and release date for a file.

mod similarity;
mod tmdb;

pub use similarity::{levenshtein, similarity};
pub use tmdb::TmdbCatalog;

use async_trait::async_trait;
use releaseforge_naming::CatalogRecord;

/// A remote title catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    fn name(&self) -> &'static str;

    /// Find the best match for a guessed title. `None` when no result is
    /// similar enough.
    async fn search(&self, title: &str, is_movie: bool) -> anyhow::Result<Option<CatalogRecord>>;

    /// Fetch a record by catalog identifier.
    async fn fetch_by_id(&self, id: u64, is_movie: bool) -> anyhow::Result<CatalogRecord>;
}
