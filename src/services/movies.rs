use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{ListRepo, MovieRepo},
    error::AppResult,
    models::{Movie, MovieCard, MovieDetails, MovieId, UserId},
    services::{
        catalog::MovieCatalog,
        formatting::{genres_to_string, poster_url, release_year},
    },
};

/// Everything the detail page shows. Every field tolerates a missing movie.
#[derive(Debug, Serialize)]
pub struct MovieDetailView {
    pub id: MovieId,
    pub movie: Option<MovieDetails>,
    pub poster: String,
    pub year: Option<String>,
    pub genres: Option<String>,
    pub on_list: bool,
}

impl MovieDetailView {
    pub fn new(id: MovieId, movie: Option<MovieDetails>, on_list: bool) -> Self {
        let details = movie.as_ref();
        Self {
            id,
            poster: poster_url(details.and_then(|m| m.poster_path.as_deref())),
            year: release_year(details.and_then(|m| m.release_date.as_deref())),
            genres: genres_to_string(details.and_then(|m| m.genres.as_deref())),
            movie,
            on_list,
        }
    }
}

/// Catalog search shaped for the poster grid
pub async fn search_cards(catalog: &dyn MovieCatalog, query: &str) -> Vec<MovieCard> {
    catalog.search(query).await.iter().map(MovieCard::from).collect()
}

pub fn cards(movies: &[Movie]) -> Vec<MovieCard> {
    movies.iter().map(MovieCard::from).collect()
}

pub async fn detail(
    pool: &SqlitePool,
    catalog: &dyn MovieCatalog,
    user_id: UserId,
    movie_id: MovieId,
) -> AppResult<MovieDetailView> {
    let movie = catalog.get_movie(movie_id).await;
    let on_list = ListRepo::contains(pool, user_id, movie_id).await?;
    Ok(MovieDetailView::new(movie_id, movie, on_list))
}

/// Puts a movie on a user's list, caching its metadata first.
///
/// Both writes share one transaction. Returns `false` without writing when the
/// catalog has no data for `movie_id`.
pub async fn add_to_list(
    pool: &SqlitePool,
    catalog: &dyn MovieCatalog,
    user_id: UserId,
    movie_id: MovieId,
) -> AppResult<bool> {
    let Some(details) = catalog.get_movie(movie_id).await else {
        tracing::warn!(user_id, movie_id, "Catalog has no data, movie not added");
        return Ok(false);
    };

    let mut tx = pool.begin().await?;
    let cached = MovieRepo::insert_or_ignore(&mut *tx, &Movie::from(&details)).await?;
    ListRepo::add(&mut *tx, user_id, movie_id).await?;
    tx.commit().await?;

    tracing::info!(user_id, movie_id, newly_cached = cached, "Movie added to list");
    Ok(true)
}

pub async fn remove_from_list(
    pool: &SqlitePool,
    user_id: UserId,
    movie_id: MovieId,
) -> AppResult<()> {
    let removed = ListRepo::remove(pool, user_id, movie_id).await?;
    tracing::info!(user_id, movie_id, removed, "Movie removed from list");
    Ok(())
}
