//! View lifetime tracking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifetime of the view that initiated a load.
///
/// Clones share state. Tearing a scope down never cancels in-flight
/// fetches; it only stops their results from being applied.
#[derive(Debug, Clone)]
pub struct ViewScope {
    active: Arc<AtomicBool>,
}

impl ViewScope {
    /// Create an active scope.
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the view as torn down.
    pub fn teardown(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether results may still be applied.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teardown_shared_across_clones() {
        let scope = ViewScope::new();
        let child = scope.clone();
        assert!(child.is_active());

        scope.teardown();
        assert!(!child.is_active());
    }
}
