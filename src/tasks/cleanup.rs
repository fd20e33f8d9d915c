//! Cleanup Task
//!
//! Background task that periodically purges expired cache entries and expired
//! login sessions. Reads already treat both as absent; this only reclaims
//! memory for keys and tokens nobody presents again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::auth::SessionStore;
use crate::cache::ReadThroughCache;

/// Spawns a background task that sweeps the cache and the session table every
/// `cleanup_interval_secs` seconds.
///
/// Returns the task's JoinHandle so it can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(state.cache.clone(), state.sessions.clone(), 30);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<V>(
    cache: ReadThroughCache<V>,
    sessions: Arc<SessionStore>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                let stats = cache.stats().await;
                info!(
                    "Cache cleanup: removed {} expired entries ({} live, hit rate {:.2})",
                    removed,
                    stats.total_entries,
                    stats.hit_rate()
                );
            } else {
                debug!("Cache cleanup: no expired entries found");
            }

            let revoked = sessions.purge_expired();
            if revoked > 0 {
                info!(
                    "Session cleanup: removed {} expired sessions ({} live)",
                    revoked,
                    sessions.len()
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions(ttl: Duration) -> Arc<SessionStore> {
        Arc::new(SessionStore::new(ttl))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache: ReadThroughCache<String> = ReadThroughCache::new();

        let _: Result<String, ()> = cache
            .get_or_fetch("expire_soon", Duration::from_millis(200), || async {
                Ok("value".to_string())
            })
            .await;

        let handle = spawn_cleanup_task(cache.clone(), sessions(Duration::from_secs(60)), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.len().await, 0, "Expired entry should have been purged");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache: ReadThroughCache<String> = ReadThroughCache::new();
        let sessions = sessions(Duration::from_secs(3600));
        let token = sessions.issue("alice");

        let _: Result<String, ()> = cache
            .get_or_fetch("long_lived", Duration::from_secs(3600), || async {
                Ok("value".to_string())
            })
            .await;

        let handle = spawn_cleanup_task(cache.clone(), sessions.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.len().await, 1, "Valid entry should not be removed");
        assert!(sessions.resolve(&token).is_some(), "Live session should be kept");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_purges_expired_sessions() {
        let cache: ReadThroughCache<u8> = ReadThroughCache::new();
        let sessions = sessions(Duration::from_millis(200));
        for user in ["alice", "bob", "carol"] {
            sessions.issue(user);
        }

        let handle = spawn_cleanup_task(cache, sessions.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(sessions.is_empty(), "Expired sessions should have been purged");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache: ReadThroughCache<u8> = ReadThroughCache::new();

        let handle = spawn_cleanup_task(cache, sessions(Duration::from_secs(60)), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
