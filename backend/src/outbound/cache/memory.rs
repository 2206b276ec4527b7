//! Process-local page cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{PageCache, PageCacheError, PageCacheKey};

#[derive(Debug, Clone)]
struct Entry {
    body: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// Page cache holding bodies in a mutex-guarded map.
#[derive(Clone)]
pub struct InMemoryPageCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl InMemoryPageCache {
    /// Create a cache whose entries live for `ttl`.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            clock,
        }
    }
}

#[async_trait]
impl PageCache for InMemoryPageCache {
    async fn get(&self, key: &PageCacheKey) -> Result<Option<Vec<u8>>, PageCacheError> {
        let now = self.clock.utc();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key.as_str()) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.body.clone())),
            Some(_) => {
                entries.remove(key.as_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &PageCacheKey, body: &[u8]) -> Result<(), PageCacheError> {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                body: body.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), PageCacheError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

#[cfg(test)]
impl InMemoryPageCache {
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
