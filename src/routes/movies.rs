use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension,
};

use crate::{
    api::AppState,
    error::AppResult,
    middleware::CurrentUser,
    models::MovieId,
    services::movies,
};

use super::{movie_id, page_context};

fn detail_url(id: MovieId) -> String {
    format!("/movie/{}", id)
}

/// Movie detail page; renders a "not found" state when the catalog has nothing
pub async fn show(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    path: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Response> {
    let id = movie_id(path)?;
    let view = movies::detail(&state.db_pool, state.catalog.as_ref(), user_id, id).await?;

    let title = view
        .movie
        .as_ref()
        .map(|m| m.title.clone())
        .unwrap_or_else(|| "Movie not found".to_string());
    let status = if view.movie.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    let mut ctx = page_context(&title);
    ctx.insert("view", &view);
    let page = state.views.render("movie.html", &ctx)?;

    Ok((status, page).into_response())
}

/// Adds the movie to the current user's list
pub async fn add(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    path: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Redirect> {
    let id = movie_id(path)?;
    movies::add_to_list(&state.db_pool, state.catalog.as_ref(), user_id, id).await?;
    Ok(Redirect::to(&detail_url(id)))
}

/// Removes the movie from the current user's list
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    path: Result<Path<MovieId>, PathRejection>,
) -> AppResult<Redirect> {
    let id = movie_id(path)?;
    movies::remove_from_list(&state.db_pool, user_id, id).await?;
    Ok(Redirect::to(&detail_url(id)))
}
