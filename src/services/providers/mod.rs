/// Metadata search provider abstraction
///
/// The title searcher only needs one capability from the outside world: a
/// free-text search returning a page of movie and series candidates. Each
/// backing catalog (TMDB today) implements this trait so the ranking pipeline
/// can be exercised against fixtures.
use crate::{error::AppResult, models::SearchPage};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for metadata search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataSearch: Send + Sync {
    /// Search movies and series by free text
    ///
    /// `page` is 1-based. Records that are neither movies nor series are
    /// filtered out by the provider.
    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
