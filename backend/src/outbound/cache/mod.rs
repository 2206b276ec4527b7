//! Page cache adapters.
//!
//! - [`InMemoryPageCache`]: process-local map with TTL checked against an
//!   injected clock.
//! - [`RedisPageCache`]: `bb8-redis` pool with namespaced keys
//!   (`blog:page:v1:<key>`) and TTL jitter so entries written together do not
//!   all expire on the same tick.

mod memory;
mod redis;

pub use memory::InMemoryPageCache;
pub use redis::{RedisPageCache, RedisPageCacheError};
