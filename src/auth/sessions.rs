//! Login sessions
//!
//! Opaque bearer tokens issued at login, mapped to the username they belong to.
//! A token is valid for a fixed lifetime from the moment it is issued.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Lifetime of a login token when none is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Expired once `ttl` has elapsed since issue. A clock that moved
    /// backwards counts as zero elapsed time.
    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        (now - self.issued_at)
            .to_std()
            .is_ok_and(|elapsed| elapsed >= ttl)
    }
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a fresh token for `username`.
    pub fn issue(&self, username: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                issued_at: Utc::now(),
            },
        );
        token
    }

    /// Returns the live session for `token`. An expired session is removed
    /// and reported as absent.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        let ttl = self.ttl;

        // The guard returned by `get` must be dropped before `remove_if`.
        let session = self.sessions.get(token)?.value().clone();
        if session.is_expired(ttl, now) {
            self.sessions
                .remove_if(token, |_, session| session.is_expired(ttl, now));
            return None;
        }
        Some(session)
    }

    /// Drops every expired session, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(self.ttl, now));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}
