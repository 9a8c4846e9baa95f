//! Server-side session storage.
//!
//! The browser only ever holds an opaque token; everything else lives behind a
//! [`SessionStore`]. SQLite is the default backend, Redis is used when
//! configured (see [`crate::db::redis`]).

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{error::AppResult, models::session::SessionData};

/// Storage backend for session state keyed by token
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the data for `token`; `None` if unknown or expired
    async fn load(&self, token: &str) -> AppResult<Option<SessionData>>;

    /// Create or overwrite the data for `token`
    async fn save(&self, token: &str, data: &SessionData) -> AppResult<()>;

    /// Forget `token`. Unknown tokens are ignored.
    async fn destroy(&self, token: &str) -> AppResult<()>;

    /// Drop every session past its lifetime. Returns the number removed.
    async fn purge_expired(&self) -> AppResult<u64>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Sessions kept in the `sessions` table
#[derive(Clone)]
pub struct SqlSessionStore {
    pool: SqlitePool,
    ttl_secs: i64,
}

impl SqlSessionStore {
    pub fn new(pool: SqlitePool, ttl_secs: u64) -> Self {
        Self {
            pool,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for SqlSessionStore {
    async fn load(&self, token: &str) -> AppResult<Option<SessionData>> {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT data, created_at FROM sessions WHERE token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        let Some((data, created_at)) = row else {
            return Ok(None);
        };

        if Utc::now().timestamp().saturating_sub(created_at) > self.ttl_secs {
            tracing::debug!("Session expired");
            self.destroy(token).await?;
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&data)?))
    }

    async fn save(&self, token: &str, data: &SessionData) -> AppResult<()> {
        let json = serde_json::to_string(data)?;
        sqlx::query(
            "INSERT INTO sessions (token, data, created_at) VALUES (?, ?, ?)
             ON CONFLICT (token) DO UPDATE SET data = excluded.data",
        )
        .bind(token)
        .bind(json)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn destroy(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let cutoff = Utc::now().timestamp().saturating_sub(self.ttl_secs);
        let result = sqlx::query("DELETE FROM sessions WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
