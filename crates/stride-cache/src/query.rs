//! Keyed, freshness-bounded cache of fetched resources.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::Instant;

use crate::key::{KeyPattern, QueryKey};
use crate::policy::CachePolicy;
use crate::StoreError;

/// Status of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Fresh cache hit.
    Hit,
    /// Entry exists but is past its staleness window or was invalidated.
    Stale,
    /// No entry for this key.
    Miss,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Stale => write!(f, "STALE"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}

/// A cached value. Entries are replaced whole, never patched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The key this entry is stored under.
    pub key: QueryKey,
    /// The cached JSON value.
    pub value: serde_json::Value,
    /// When the value was fetched.
    pub fetched_at: Instant,
    /// Freshness and retention windows in force when the value was stored.
    pub policy: CachePolicy,
    invalidated: bool,
}

impl CacheEntry {
    /// Time since the value was fetched.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.fetched_at)
    }

    /// Whether the next read must refetch.
    pub fn is_stale(&self) -> bool {
        self.invalidated || !self.policy.is_fresh(self.age())
    }

    fn is_expired(&self) -> bool {
        !self.policy.is_retained(self.age())
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<QueryKey, CacheEntry>,
    default_policy: CachePolicy,
    overrides: Vec<(QueryKey, CachePolicy)>,
}

impl Inner {
    fn policy_for(&self, key: &QueryKey) -> CachePolicy {
        self.overrides
            .iter()
            .filter(|(prefix, _)| key.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.segments().len())
            .map(|(_, policy)| *policy)
            .unwrap_or(self.default_policy)
    }
}

/// Shared query cache.
///
/// Clones share entries; separately constructed caches are independent.
/// Every operation touches a single key atomically and never awaits, so a
/// fetch that was in flight when its key got invalidated may still
/// repopulate the entry once it completes.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    inner: Arc<RwLock<Inner>>,
}

impl QueryCache {
    /// Create an empty cache with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with a custom default policy.
    pub fn with_policy(policy: CachePolicy) -> Self {
        let cache = Self::new();
        cache.write().default_policy = policy;
        cache
    }

    /// Override the policy for every key under `prefix`.
    ///
    /// The longest matching prefix wins.
    pub fn with_override(self, prefix: impl Into<QueryKey>, policy: CachePolicy) -> Self {
        let prefix = prefix.into();
        {
            let mut inner = self.write();
            inner.overrides.retain(|(p, _)| p != &prefix);
            inner.overrides.push((prefix, policy));
        }
        self
    }

    /// Get the policy that applies to a key.
    pub fn policy_for(&self, key: &QueryKey) -> CachePolicy {
        self.read().policy_for(key)
    }

    /// Look up the freshness status of a key.
    pub fn status(&self, key: &QueryKey) -> CacheStatus {
        match self.read().entries.get(key) {
            Some(entry) if entry.is_stale() => CacheStatus::Stale,
            Some(_) => CacheStatus::Hit,
            None => CacheStatus::Miss,
        }
    }

    /// Get a fresh raw value.
    pub fn get_value(&self, key: &QueryKey) -> Option<serde_json::Value> {
        let inner = self.read();
        let entry = inner.entries.get(key)?;
        if entry.is_stale() {
            tracing::trace!(key = %key, "cache stale");
            return None;
        }
        Some(entry.value.clone())
    }

    /// Get a fresh value, decoded as `T`.
    ///
    /// A value that does not decode as `T` is treated as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "cached value did not decode");
                None
            }
        }
    }

    /// Store a value, replacing any prior entry for the key.
    pub fn set<T: Serialize>(&self, key: &QueryKey, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value);
        Ok(())
    }

    /// Store a raw value, replacing any prior entry for the key.
    pub fn set_value(&self, key: &QueryKey, value: serde_json::Value) {
        let mut inner = self.write();
        let policy = inner.policy_for(key);
        inner.entries.insert(
            key.clone(),
            CacheEntry {
                key: key.clone(),
                value,
                fetched_at: Instant::now(),
                policy,
                invalidated: false,
            },
        );
        Self::prune_locked(&mut inner);
    }

    /// Mark every matching entry stale, returning how many were marked.
    pub fn invalidate(&self, pattern: &KeyPattern) -> usize {
        let mut inner = self.write();
        let mut count = 0;
        for entry in inner.entries.values_mut().filter(|e| pattern.matches(&e.key)) {
            entry.invalidated = true;
            count += 1;
        }
        tracing::debug!(?pattern, count, "cache invalidated");
        count
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.write().entries.clear();
        tracing::debug!("cache cleared");
    }

    /// Drop entries past their retention window, returning how many were dropped.
    pub fn prune(&self) -> usize {
        Self::prune_locked(&mut self.write())
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the fresh cached value, or run `fetcher` and cache its success.
    ///
    /// Failures are returned as-is and never cached.
    pub async fn fetch_with<T, E, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get::<T>(key) {
            tracing::trace!(key = %key, "cache hit");
            return Ok(cached);
        }

        let value = fetcher().await?;
        if let Err(e) = self.set(key, &value) {
            tracing::warn!(key = %key, error = %e, "fetched value not cached");
        }
        Ok(value)
    }

    fn prune_locked(inner: &mut Inner) -> usize {
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        let dropped = before - inner.entries.len();
        if dropped > 0 {
            tracing::trace!(dropped, "cache pruned");
        }
        dropped
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
