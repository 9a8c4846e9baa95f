use serde::Serialize;
use sqlx::FromRow;

use super::{MovieId, UserId};

/// Cached catalog metadata, a row of the `movies` table
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i64>,
    pub tagline: Option<String>,
    pub title: String,
}

/// A row of the `movie_lists` table
#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct ListEntry {
    pub user_id: UserId,
    pub movie_id: MovieId,
}
