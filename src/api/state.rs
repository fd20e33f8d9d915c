//! Application state
//!
//! Dependencies shared by every handler. Constructed once at startup and
//! cloned per request; all clones share the same store, cache and directories.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::auth::{Identity, SessionStore, UserDirectory, DEFAULT_SESSION_TTL};
use crate::cache::{InvalidationPolicy, ReadThroughCache, Snapshot, WriteEvent};
use crate::config::Config;
use crate::store::{self, Repository, StoreResult};

#[derive(Clone)]
pub struct AppState {
    /// Persistence for items and orders
    pub repository: Arc<dyn Repository>,
    /// Read-through cache over repository reads
    pub cache: ReadThroughCache<Snapshot>,
    /// Decides which cached reads a write makes stale
    pub invalidation: Arc<dyn InvalidationPolicy>,
    /// TTL applied to every cached read
    pub cache_ttl: Duration,
    /// Users, password hashes, role memberships
    pub users: Arc<UserDirectory>,
    /// Bearer tokens issued at login
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn Repository>,
        invalidation: Arc<dyn InvalidationPolicy>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache: ReadThroughCache::new(),
            invalidation,
            cache_ttl,
            users: Arc::new(UserDirectory::new()),
            sessions: Arc::new(SessionStore::new(DEFAULT_SESSION_TTL)),
        }
    }

    /// Replaces the session table with one whose tokens live for `ttl`.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = Arc::new(SessionStore::new(ttl));
        self
    }

    /// Opens the configured repository and builds state around it.
    pub async fn from_config(config: &Config) -> StoreResult<Self> {
        let storage = store::open(config.database_url.as_deref()).await?;
        let users = match storage.pool {
            Some(pool) => UserDirectory::persistent(pool).await?,
            None => UserDirectory::new(),
        };

        let mut state = Self::new(storage.repository, config.invalidation.policy(), config.cache_ttl)
            .with_session_ttl(config.session_ttl);
        state.users = Arc::new(users);
        Ok(state)
    }

    /// Applies the invalidation policy for a committed write.
    pub async fn record_write(&self, event: WriteEvent) {
        let keys = self.invalidation.keys_to_invalidate(&event);
        if keys.is_empty() {
            return;
        }

        let dropped = self.cache.invalidate(&keys).await;
        debug!(
            policy = self.invalidation.name(),
            ?event,
            dropped,
            "cache invalidated"
        );
    }

    /// Resolves a bearer token to the caller's current identity.
    pub async fn resolve_identity(&self, token: &str) -> Option<Identity> {
        let session = self.sessions.resolve(token)?;
        self.users.identity(&session.username).await
    }
}
