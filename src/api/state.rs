use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{api::Views, db::SessionStore, services::catalog::MovieCatalog};

/// How the session cookie is issued
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: "movie_night_session".to_string(),
            secure: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub catalog: Arc<dyn MovieCatalog>,
    pub sessions: Arc<dyn SessionStore>,
    pub views: Views,
    pub cookie: CookieSettings,
}

impl AppState {
    pub fn new(
        db_pool: SqlitePool,
        catalog: Arc<dyn MovieCatalog>,
        sessions: Arc<dyn SessionStore>,
        views: Views,
        cookie: CookieSettings,
    ) -> Self {
        Self {
            db_pool,
            catalog,
            sessions,
            views,
            cookie,
        }
    }
}
