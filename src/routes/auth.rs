use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};

use crate::{
    api::AppState,
    error::AppResult,
    middleware::{
        session::{end_session, start_session},
        Session,
    },
    services::auth::{self, AuthError, LoginForm, RegisterForm},
};

fn render(state: &AppState, template: &str, error: Option<&str>) -> AppResult<Html<String>> {
    let mut ctx = tera::Context::new();
    ctx.insert("logged_in", &false);
    if let Some(error) = error {
        ctx.insert("error", error);
    }
    state.views.render(template, &ctx)
}

/// Form page sent together with a cookie that drops any previous session
fn form_response(cleared: HeaderValue, page: Html<String>) -> Response {
    ([(header::SET_COOKIE, cleared)], page).into_response()
}

fn logged_in_response(cookie: HeaderValue) -> Response {
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

pub async fn login_form(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Response> {
    let cleared = end_session(&state, &session).await?;
    Ok(form_response(cleared, render(&state, "login.html", None)?))
}

pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let cleared = end_session(&state, &session).await?;

    match auth::login(&state.db_pool, &form).await {
        Ok(user) => Ok(logged_in_response(start_session(&state, user.id).await?)),
        Err(AuthError::Rejected(message)) => Ok(form_response(
            cleared,
            render(&state, "login.html", Some(&message))?,
        )),
        Err(AuthError::App(e)) => Err(e),
    }
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Response> {
    let cleared = end_session(&state, &session).await?;
    tracing::info!(user_id = ?session.user_id(), "User logged out");
    Ok(([(header::SET_COOKIE, cleared)], Redirect::to("/")).into_response())
}

pub async fn register_form(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Response> {
    let cleared = end_session(&state, &session).await?;
    Ok(form_response(cleared, render(&state, "register.html", None)?))
}

pub async fn register(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let cleared = end_session(&state, &session).await?;

    match auth::register(&state.db_pool, &form).await {
        Ok(user) => Ok(logged_in_response(start_session(&state, user.id).await?)),
        Err(AuthError::Rejected(message)) => Ok(form_response(
            cleared,
            render(&state, "register.html", Some(&message))?,
        )),
        Err(AuthError::App(e)) => Err(e),
    }
}
