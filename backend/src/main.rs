//! Blog server entry-point: loads settings, selects adapters and serves the
//! HTTP routes.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog::domain::ports::PageCache;
use blog::inbound::http::health::HealthState;
use blog::inbound::http::session_config::fingerprint::key_fingerprint;
use blog::inbound::http::session_config::{BuildMode, session_settings_from_env};
use blog::outbound::cache::{InMemoryPageCache, RedisPageCache};
use blog::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use blog::settings::AppSettings;
use server::{ServerConfig, create_server};

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn select_page_cache(
    settings: &AppSettings,
) -> std::io::Result<Option<Arc<dyn PageCache>>> {
    let Some(ttl) = settings.cache_ttl() else {
        info!("page cache disabled");
        return Ok(None);
    };
    let cache: Arc<dyn PageCache> = match settings.redis_url.as_deref() {
        Some(url) => Arc::new(
            RedisPageCache::connect(url, ttl)
                .await
                .map_err(|err| io_error("redis page cache", err))?,
        ),
        None => Arc::new(InMemoryPageCache::new(ttl, Arc::new(DefaultClock))),
    };
    Ok(Some(cache))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io_error("settings", err))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(|err| io_error("session settings", err))?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");

    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io_error("bind address", err))?;
    let mut config = ServerConfig::new(session, bind_addr);

    if let Some(database_url) = settings.database_url.as_deref() {
        if settings.run_migrations {
            let url = database_url.to_owned();
            let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
                .await
                .map_err(|err| io_error("migration task", err))?
                .map_err(|err| io_error("migrations", err))?;
            info!(count = applied.len(), "migrations applied");
        }
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|err| io_error("database pool", err))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; content is kept in memory");
    }

    if let Some(cache) = select_page_cache(&settings).await? {
        config = config.with_page_cache(cache);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await
}
