use axum::{extract::State, response::Html, Extension};

use crate::{
    api::{AppState, Views},
    db::ListRepo,
    error::AppResult,
    middleware::CurrentUser,
    models::MovieCard,
    services::movies::cards,
};

use super::page_context;

const EMPTY_LIST: &str = "Welcome to Movie Night! Search for movies to add them to your list.";

/// Renders the poster grid, or `empty_message` when there is nothing to show
pub(super) fn movie_grid(
    views: &Views,
    title: &str,
    header_title: &str,
    empty_message: &str,
    movies: &[MovieCard],
    query: Option<&str>,
) -> AppResult<Html<String>> {
    let mut ctx = page_context(title);
    ctx.insert("header_title", header_title);
    ctx.insert("error", empty_message);
    if !movies.is_empty() {
        ctx.insert("movies", movies);
    }
    if let Some(query) = query {
        ctx.insert("query", query);
    }
    views.render("list-movies.html", &ctx)
}

/// "My List": the current user's movies
pub async fn index(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> AppResult<Html<String>> {
    let movies = ListRepo::movies_for_user(&state.db_pool, user_id).await?;
    movie_grid(&state.views, "My List", "My List", EMPTY_LIST, &cards(&movies), None)
}
