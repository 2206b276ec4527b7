//! Port interface for caching rendered page bodies.
//!
//! Entries expire after the adapter's TTL. Writes to posts never invalidate
//! the cache; only [`PageCache::clear`] or expiry does.
use async_trait::async_trait;

use super::{PageCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum PageCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "page cache backend failure: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Read a cached body for the given key.
    async fn get(&self, key: &PageCacheKey) -> Result<Option<Vec<u8>>, PageCacheError>;

    /// Store a body under the supplied key.
    async fn put(&self, key: &PageCacheKey, body: &[u8]) -> Result<(), PageCacheError>;

    /// Drop every cached entry.
    async fn clear(&self) -> Result<(), PageCacheError>;
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpPageCache;

#[async_trait]
impl PageCache for NoOpPageCache {
    async fn get(&self, _key: &PageCacheKey) -> Result<Option<Vec<u8>>, PageCacheError> {
        Ok(None)
    }

    async fn put(&self, _key: &PageCacheKey, _body: &[u8]) -> Result<(), PageCacheError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), PageCacheError> {
        Ok(())
    }
}
