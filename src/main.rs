use std::{sync::Arc, time::Duration};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_night::{
    api::{AppState, CookieSettings, Views},
    config::Config,
    db::{create_pool, create_redis_client, RedisSessionStore, SessionStore, SqlSessionStore},
    routes::create_router,
    services::{MovieCatalog, TmdbClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_night=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    tracing::info!("Database ready");

    let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.catalog_timeout_secs),
    )?);

    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let client = create_redis_client(url)?;
            Arc::new(RedisSessionStore::connect(client, config.session_ttl_secs).await?)
        }
        None => Arc::new(SqlSessionStore::new(
            db_pool.clone(),
            config.session_ttl_secs,
        )),
    };
    let purged = sessions.purge_expired().await?;
    tracing::info!(
        store = sessions.name(),
        purged,
        catalog = catalog.name(),
        "Session store ready"
    );

    let views = Views::load(&config.templates_dir)?;
    let cookie = CookieSettings {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
    };

    let state = AppState::new(db_pool, catalog, sessions, views, cookie);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
