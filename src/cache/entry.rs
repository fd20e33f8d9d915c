//! Cache Entry Module
//!
//! A cached snapshot paired with the absolute instant it stops being served.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    /// Expiration timestamp (Unix milliseconds), fixed at write time
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    /// Creates an entry that expires `ttl` from now. Reads never extend it.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl.as_millis() as u64),
        }
    }

    /// An entry is expired once the current time reaches `expires_at`.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
