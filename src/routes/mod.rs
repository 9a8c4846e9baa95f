use axum::{
    extract::rejection::PathRejection,
    extract::Path,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    api::AppState,
    error::{error_page, AppError, AppResult},
    middleware::{
        error_page_middleware, make_span_with_request_id, request_id_middleware, require_login,
        session_middleware,
    },
    models::MovieId,
};

pub mod auth;
pub mod compare;
pub mod list;
pub mod movies;
pub mod search;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(member_routes())
        .merge(public_routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(middleware::from_fn(error_page_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    session_middleware,
                )),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .with_state(state)
}

/// Routes that need a logged-in user
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list::index))
        .route("/search", get(search::search).post(search::search_submit))
        .route("/compare", get(compare::compare_form).post(compare::compare))
        .route("/movie/:id", get(movies::show).post(movies::add))
        .route("/movie/delete/:id", post(movies::delete))
        .route_layer(middleware::from_fn(require_login))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND, "The page you were looking for doesn't exist.")
}

/// Movie id from the path; anything that is not a number is an unknown page
fn movie_id(path: Result<Path<MovieId>, PathRejection>) -> AppResult<MovieId> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound("No such movie.".to_string()))
}

/// Base template context shared by every member page
fn page_context(title: &str) -> tera::Context {
    let mut ctx = tera::Context::new();
    ctx.insert("title", title);
    ctx.insert("logged_in", &true);
    ctx
}
