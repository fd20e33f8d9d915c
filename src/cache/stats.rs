//! Cache Statistics Module
//!
//! Counters for the read-through cache: how often a snapshot was served,
//! how often the store had to be consulted, and how entries left the cache.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of read-through cache counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from an unexpired entry
    pub hits: u64,
    /// Lookups that found no entry or an expired one
    pub misses: u64,
    /// Store fetches whose result was written back
    pub fetches: u64,
    /// Entries that reached their TTL and were dropped
    pub expirations: u64,
    /// Entries dropped by an invalidation policy
    pub invalidations: u64,
    /// Entries currently held
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of lookups served without touching the store.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    pub(crate) fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub(crate) fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub(crate) fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
