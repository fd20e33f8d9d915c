//! Read-Through Cache
//!
//! Shared, cloneable handle over a [`CacheStore`] that answers lookups from
//! cache and falls back to a caller-supplied fetch on miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};

// == Read-Through Cache ==
/// Process-wide cache handle. Clones share the same underlying store.
#[derive(Debug)]
pub struct ReadThroughCache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for ReadThroughCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> ReadThroughCache<V> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheStore::new())),
        }
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetch`, caches its result
    /// for `ttl` and returns it.
    ///
    /// The lock is released while `fetch` runs, so concurrent misses on the
    /// same key may each call their fetch; the last write wins. A failed
    /// fetch is returned to the caller and leaves the cache untouched.
    ///
    /// If any invalidation lands while `fetch` runs, its result is returned
    /// but not stored: it may predate the write that caused the invalidation.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, ttl: Duration, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let (cached, epoch) = {
            let mut store = self.inner.write().await;
            (store.get(key), store.epoch())
        };
        if let Some(value) = cached {
            debug!(key, "served from cache");
            return Ok(value);
        }

        let value = fetch().await?;

        let mut store = self.inner.write().await;
        store.record_fetch();
        if store.epoch() != epoch {
            debug!(key, "invalidated during fetch, not cached");
            return Ok(value);
        }
        store.set(key.to_string(), value.clone(), ttl);
        debug!(key, ttl_ms = ttl.as_millis() as u64, "fetched from store");

        Ok(value)
    }

    // == Invalidate ==
    /// Drops the given keys, returning how many entries were present.
    pub async fn invalidate<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.inner.write().await.remove_keys(keys)
    }

    // == Cleanup Expired ==
    pub async fn cleanup_expired(&self) -> usize {
        self.inner.write().await.cleanup_expired()
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

impl<V: Clone> Default for ReadThroughCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
