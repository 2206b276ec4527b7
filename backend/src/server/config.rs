//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use blog::domain::ports::{NoOpPageCache, PageCache};
use blog::inbound::http::session_config::SessionSettings;
use blog::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) page_cache: Arc<dyn PageCache>,
}

impl ServerConfig {
    /// Construct a configuration with in-memory content and no page cache.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            page_cache: Arc::new(NoOpPageCache),
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Cache global feed pages in `cache`.
    #[must_use]
    pub fn with_page_cache(mut self, cache: Arc<dyn PageCache>) -> Self {
        self.page_cache = cache;
        self
    }
}
