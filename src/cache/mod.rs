//! Cache Module
//!
//! Read-through caching with absolute per-entry expiry, plus the policy that
//! decides which entries a write invalidates.

mod entry;
mod invalidation;
pub mod keys;
mod read_through;
mod snapshot;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use entry::CacheEntry;
pub use invalidation::{InvalidationMode, InvalidationPolicy, Strict, TtlOnly, WriteEvent};
pub use read_through::ReadThroughCache;
pub use snapshot::{Snapshot, SnapshotMismatch};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL for every cached fetch: inventory list, single item, order list, single order.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);
