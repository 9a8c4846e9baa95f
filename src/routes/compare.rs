use axum::{extract::State, response::Html, Extension, Form};

use crate::{
    api::AppState,
    db::UserRepo,
    error::{AppError, AppResult},
    middleware::CurrentUser,
    models::UserId,
    services::{compare::shared_movies, movies::cards},
};

use super::{list::movie_grid, page_context};

const NOTHING_IN_COMMON: &str = "Sorry, you don't have any movies in common.";
const NOBODY_SELECTED: &str = "Please select at least one user to compare with.";

/// Selected user ids from a checkbox form (`users` or `users[]`, repeated)
fn selected_users(fields: &[(String, String)]) -> AppResult<Vec<UserId>> {
    fields
        .iter()
        .filter(|(key, _)| key == "users" || key == "users[]")
        .map(|(_, value)| {
            value
                .trim()
                .parse::<UserId>()
                .map_err(|_| AppError::InvalidInput(format!("Invalid user id: {}", value)))
        })
        .collect()
}

async fn render_form(
    state: &AppState,
    user_id: UserId,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let users = UserRepo::list_others(&state.db_pool, user_id).await?;

    let mut ctx = page_context("Compare Lists");
    ctx.insert("users", &users);
    if let Some(error) = error {
        ctx.insert("error", error);
    }
    state.views.render("compare.html", &ctx)
}

/// Selection form listing every other user
pub async fn compare_form(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> AppResult<Html<String>> {
    render_form(&state, user_id, None).await
}

/// Movies on the current user's list and on every selected user's list
pub async fn compare(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Html<String>> {
    let selected = selected_users(&fields)?;
    if selected.is_empty() {
        return render_form(&state, user_id, Some(NOBODY_SELECTED)).await;
    }

    let movies = shared_movies(&state.db_pool, user_id, &selected).await?;
    tracing::info!(
        user_id,
        compared_with = selected.len(),
        shared = movies.len(),
        "Lists compared"
    );

    movie_grid(
        &state.views,
        "Your Shared Movies",
        "Shared Movies",
        NOTHING_IN_COMMON,
        &cards(&movies),
        None,
    )
}
