/// Movie catalog abstraction
///
/// Route handlers only talk to a [`MovieCatalog`]; the TMDB implementation lives
/// in [`tmdb`]. Implementations never surface upstream failures: a failed search
/// is an empty result and a failed lookup is `None`.
use crate::models::{CatalogMovie, MovieDetails, MovieId};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Maximum number of search results shown on a page
pub const MAX_SEARCH_RESULTS: usize = 12;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search movies by free text, at most [`MAX_SEARCH_RESULTS`] entries
    async fn search(&self, query: &str) -> Vec<CatalogMovie>;

    /// Full details for one movie, `None` if the catalog has nothing
    async fn get_movie(&self, id: MovieId) -> Option<MovieDetails>;

    /// Catalog name for logging and debugging
    fn name(&self) -> &'static str;
}
