use serde::{Deserialize, Serialize};

use crate::services::formatting::{poster_url, release_year};

pub mod movie;
pub mod session;
pub mod user;

pub use movie::{ListEntry, Movie};
pub use session::SessionData;
pub use user::{User, UserSummary};

/// Catalog movie id (TMDB id)
pub type MovieId = i64;

/// Local user id
pub type UserId = i64;

// ============================================================================
// TMDB API Types
// ============================================================================

/// One entry of a TMDB `search/movie` response
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CatalogMovie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Envelope of a TMDB `search/movie` response
#[derive(Debug, Deserialize)]
pub struct CatalogSearchPage {
    #[serde(default)]
    pub results: Vec<CatalogMovie>,
}

/// TMDB genre object
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Genre {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Flat TMDB `movie/{id}` response
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
}

impl From<&MovieDetails> for Movie {
    fn from(details: &MovieDetails) -> Self {
        Movie {
            id: details.id,
            overview: details.overview.clone(),
            poster_path: details.poster_path.clone(),
            release_date: details.release_date.clone(),
            runtime: details.runtime,
            tagline: details.tagline.clone(),
            title: details.title.clone(),
        }
    }
}

// ============================================================================
// View Types
// ============================================================================

/// A movie shaped for the poster grid
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub year: Option<String>,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        MovieCard {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: poster_url(movie.poster_path.as_deref()),
            year: release_year(movie.release_date.as_deref()),
        }
    }
}

impl From<&CatalogMovie> for MovieCard {
    fn from(movie: &CatalogMovie) -> Self {
        MovieCard {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: poster_url(movie.poster_path.as_deref()),
            year: release_year(movie.release_date.as_deref()),
        }
    }
}
