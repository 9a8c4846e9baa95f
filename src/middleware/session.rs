use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use cookie::{Cookie, SameSite};
use uuid::Uuid;

use crate::{
    api::{AppState, CookieSettings},
    error::{AppError, AppResult},
    models::{SessionData, UserId},
};

/// Session resolved for the current request, stored in request extensions
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Token from the cookie, only kept when the store knows it
    pub token: Option<String>,
    pub data: SessionData,
}

impl Session {
    pub fn user_id(&self) -> Option<UserId> {
        self.data.user_id
    }
}

/// Identity of the logged-in user, inserted by [`require_login`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

/// Value of cookie `name` from the `Cookie` request header
fn token_from_headers(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .find_map(|kv| kv.trim().strip_prefix(&format!("{name}=")))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Middleware that loads the session named by the session cookie.
///
/// Every request gets a [`Session`] extension; unknown or unreadable sessions
/// resolve to an empty one.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut session = Session::default();

    if let Some(token) = token_from_headers(request.headers(), &state.cookie.name) {
        match state.sessions.load(&token).await {
            Ok(Some(data)) => {
                session = Session {
                    token: Some(token),
                    data,
                }
            }
            Ok(None) => tracing::debug!("Unknown session token"),
            Err(e) => tracing::warn!(
                error = %e,
                store = state.sessions.name(),
                "Failed to load session"
            ),
        }
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Guard for routes that need a logged-in user.
///
/// Without an identity the request is answered with a redirect to `/login`;
/// otherwise a [`CurrentUser`] extension is added for the handler.
pub async fn require_login(mut request: Request, next: Next) -> Response {
    let user_id = request
        .extensions()
        .get::<Session>()
        .and_then(Session::user_id);

    match user_id {
        Some(user_id) => {
            request.extensions_mut().insert(CurrentUser(user_id));
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

fn to_header(cookie: Cookie<'_>) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))
}

fn session_cookie(settings: &CookieSettings, token: &str) -> AppResult<HeaderValue> {
    let cookie = Cookie::build((settings.name.clone(), token.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .path("/")
        .build();
    to_header(cookie)
}

fn removal_cookie(settings: &CookieSettings) -> AppResult<HeaderValue> {
    let mut cookie = Cookie::build((settings.name.clone(), String::new()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .path("/")
        .build();
    cookie.make_removal();
    to_header(cookie)
}

/// Stores a fresh session for `user_id` and returns its `Set-Cookie` value
pub async fn start_session(state: &AppState, user_id: UserId) -> AppResult<HeaderValue> {
    let token = Uuid::new_v4().to_string();
    state
        .sessions
        .save(&token, &SessionData::for_user(user_id))
        .await?;

    tracing::debug!(user_id = user_id, store = state.sessions.name(), "Session started");

    match state.sessions.purge_expired().await {
        Ok(0) => {}
        Ok(purged) => tracing::debug!(purged, "Expired sessions removed"),
        Err(e) => tracing::warn!(
            error = %e,
            store = state.sessions.name(),
            "Failed to purge expired sessions"
        ),
    }

    session_cookie(&state.cookie, &token)
}

/// Forgets the current session and returns a `Set-Cookie` value removing it
pub async fn end_session(state: &AppState, session: &Session) -> AppResult<HeaderValue> {
    if let Some(token) = &session.token {
        state.sessions.destroy(token).await?;
        tracing::debug!(user_id = ?session.user_id(), "Session ended");
    }
    removal_cookie(&state.cookie)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        api::Views,
        db::{sqlite::test_pool, SqlSessionStore},
        services::catalog::MockMovieCatalog,
    };

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_token_from_headers() {
        let h = headers("theme=dark; movie_night_session=abc-123; other=1");
        assert_eq!(
            token_from_headers(&h, "movie_night_session"),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_token_missing_or_empty() {
        assert_eq!(token_from_headers(&HeaderMap::new(), "s"), None);
        assert_eq!(token_from_headers(&headers("s="), "s"), None);
        assert_eq!(token_from_headers(&headers("xs=1"), "s"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let value = session_cookie(&CookieSettings::default(), "tok").unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("movie_night_session=tok"));
        assert!(text.contains("HttpOnly"));
        assert!(text.contains("SameSite=Lax"));
        assert!(text.contains("Path=/"));
        assert!(!text.contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let value = removal_cookie(&CookieSettings::default()).unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("movie_night_session=;"));
        assert!(text.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_start_session_sweeps_expired_sessions() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO sessions (token, data, created_at) VALUES ('stale', '{}', 0)")
            .execute(&pool)
            .await
            .unwrap();

        let state = AppState::new(
            pool.clone(),
            Arc::new(MockMovieCatalog::new()),
            Arc::new(SqlSessionStore::new(pool.clone(), 60)),
            Views::load(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")).unwrap(),
            CookieSettings::default(),
        );

        for _ in 0..3 {
            start_session(&state, 1).await.unwrap();
        }

        let tokens: Vec<String> = sqlx::query_scalar("SELECT token FROM sessions")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(!tokens.iter().any(|t| t == "stale"));
    }
}
