//! Freshness and retention policies for cached queries.

use std::time::Duration;

/// Default staleness window: 5 minutes.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Default retention window: 30 minutes.
pub const DEFAULT_RETAIN_FOR: Duration = Duration::from_secs(30 * 60);

/// Cache policy for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Age after which a cached value must be refetched on next read.
    pub stale_after: Duration,
    /// Age after which a cached value is dropped entirely.
    pub retain_for: Duration,
}

impl CachePolicy {
    /// Create a new cache policy.
    ///
    /// Retention is never shorter than the staleness window.
    pub fn new(stale_after: Duration, retain_for: Duration) -> Self {
        Self {
            stale_after,
            retain_for: retain_for.max(stale_after),
        }
    }

    /// A policy for volatile resources that are refetched on every read.
    pub fn always_stale() -> Self {
        Self {
            stale_after: Duration::ZERO,
            retain_for: DEFAULT_RETAIN_FOR,
        }
    }

    /// Set the staleness window.
    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self.retain_for = self.retain_for.max(stale_after);
        self
    }

    /// Set the retention window.
    pub fn with_retain_for(mut self, retain_for: Duration) -> Self {
        self.retain_for = retain_for.max(self.stale_after);
        self
    }

    /// Check whether a value of this age is still fresh.
    pub fn is_fresh(&self, age: Duration) -> bool {
        age < self.stale_after
    }

    /// Check whether a value of this age should still be retained.
    pub fn is_retained(&self, age: Duration) -> bool {
        age < self.retain_for
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: DEFAULT_STALE_AFTER,
            retain_for: DEFAULT_RETAIN_FOR,
        }
    }
}
