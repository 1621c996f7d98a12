//! Client-local state for the stride client.
//!
//! This crate provides:
//! - `KeyValueStore` - Synchronous persisted key-value storage
//! - `MemoryStore` / `FileStore` - In-process and on-disk stores
//! - `QueryCache` - Keyed, freshness-bounded cache of fetched resources
//! - `QueryKey` / `KeyPattern` - Cache keys and invalidation patterns
//! - `CachePolicy` - Staleness and retention windows
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_cache::{QueryCache, QueryKey, KeyPattern};
//!
//! let cache = QueryCache::new();
//! let key = QueryKey::from(["goals", "primary"]);
//!
//! cache.set(&key, &goal)?;
//! let cached: Option<Goal> = cache.get(&key);
//!
//! // After creating a goal, force the next read to refetch.
//! cache.invalidate(&KeyPattern::prefix(["goals"]));
//! ```

mod error;
mod key;
mod policy;
mod query;
mod store;

pub use error::StoreError;
pub use key::{KeyPattern, QueryKey};
pub use policy::{CachePolicy, DEFAULT_RETAIN_FOR, DEFAULT_STALE_AFTER};
pub use query::{CacheEntry, CacheStatus, QueryCache};
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CachePolicy, KeyPattern, KeyValueStore, QueryCache, QueryKey, StoreError};
}
