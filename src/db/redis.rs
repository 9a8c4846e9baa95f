use redis::{aio::ConnectionManager, AsyncCommands, Client};

use crate::{db::sessions::SessionStore, error::AppResult, models::session::SessionData};

/// Redis key for a session token
fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

/// Creates a Redis client
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Sessions kept in Redis, expired by Redis itself
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl RedisSessionStore {
    /// Opens a managed connection that reconnects on failure
    pub async fn connect(client: Client, ttl_secs: u64) -> AppResult<Self> {
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn, ttl_secs })
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, token: &str) -> AppResult<Option<SessionData>> {
        let mut conn = self.conn.clone();
        let stored: Option<String> = conn.get(session_key(token)).await?;

        match stored {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, token: &str, data: &SessionData) -> AppResult<()> {
        let json = serde_json::to_string(data)?;
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(session_key(token), json, self.ttl_secs).await?;
        Ok(())
    }

    async fn destroy(&self, token: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(session_key(token)).await?;
        Ok(())
    }

    /// Keys carry their own TTL, so there is nothing to sweep
    async fn purge_expired(&self) -> AppResult<u64> {
        Ok(0)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
