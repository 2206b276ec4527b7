//! Redis-backed page cache.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use rand::Rng;
use tracing::debug;

use crate::domain::ports::{PageCache, PageCacheError, PageCacheKey};

/// Namespace prepended to every key; bump the version to orphan old entries.
pub const KEY_NAMESPACE: &str = "blog:page:v1:";

/// Errors raised while building the Redis pool.
#[derive(Debug, thiserror::Error)]
pub enum RedisPageCacheError {
    /// The URL was rejected or the pool could not connect.
    #[error("failed to build redis pool: {message}")]
    Build {
        /// Underlying client error.
        message: String,
    },
}

/// Page cache storing bodies in Redis with `SET ... EX`.
#[derive(Clone)]
pub struct RedisPageCache {
    pool: Pool<RedisConnectionManager>,
    ttl_secs: u64,
    jitter_secs: u64,
}

impl RedisPageCache {
    /// Connect to `redis_url` and cache entries for roughly `ttl`.
    ///
    /// Up to a tenth of the TTL is added as random jitter per write.
    pub async fn connect(redis_url: &str, ttl: Duration) -> Result<Self, RedisPageCacheError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(|err| {
            RedisPageCacheError::Build {
                message: err.to_string(),
            }
        })?;
        let pool = Pool::builder()
            .max_size(8)
            .connection_timeout(Duration::from_secs(2))
            .build(manager)
            .await
            .map_err(|err| RedisPageCacheError::Build {
                message: err.to_string(),
            })?;
        let ttl_secs = ttl.as_secs().max(1);
        Ok(Self {
            pool,
            ttl_secs,
            jitter_secs: ttl_secs / 10,
        })
    }

    fn namespaced(key: &PageCacheKey) -> String {
        format!("{KEY_NAMESPACE}{}", key.as_str())
    }

    fn expiry_secs(&self) -> u64 {
        if self.jitter_secs == 0 {
            return self.ttl_secs;
        }
        self.ttl_secs + rand::thread_rng().gen_range(0..=self.jitter_secs)
    }
}

fn backend_error(err: impl std::fmt::Display) -> PageCacheError {
    PageCacheError::backend(err.to_string())
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn get(&self, key: &PageCacheKey) -> Result<Option<Vec<u8>>, PageCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        conn.get::<_, Option<Vec<u8>>>(Self::namespaced(key))
            .await
            .map_err(backend_error)
    }

    async fn put(&self, key: &PageCacheKey, body: &[u8]) -> Result<(), PageCacheError> {
        let expiry = self.expiry_secs();
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        conn.set_ex::<_, _, ()>(Self::namespaced(key), body, expiry)
            .await
            .map_err(backend_error)
    }

    async fn clear(&self) -> Result<(), PageCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let keys: Vec<String> = conn
            .keys(format!("{KEY_NAMESPACE}*"))
            .await
            .map_err(backend_error)?;
        debug!(count = keys.len(), "clearing cached pages");
        if keys.is_empty() {
            return Ok(());
        }
        conn.del::<_, ()>(keys).await.map_err(backend_error)
    }
}
