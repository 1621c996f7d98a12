//! Navigation hook for session-expiry redirects.

use std::sync::{Mutex, PoisonError};

/// Moves the active view to another location.
///
/// This is the only UI side effect the gateway triggers.
pub trait Navigator: Send + Sync {
    /// The location the user is currently at, if known.
    fn current_path(&self) -> Option<String>;

    /// Send the user to `path`.
    fn redirect(&self, path: &str);
}

/// Navigator that ignores redirects.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_path(&self) -> Option<String> {
        None
    }

    fn redirect(&self, path: &str) {
        tracing::debug!(path, "redirect ignored");
    }
}

/// Navigator that tracks its location and records every redirect.
///
/// Useful for tests and for hosts that poll for a pending redirect.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    current: Mutex<Option<String>>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Create a navigator with no known location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator positioned at `path`.
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(Some(path.into())),
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// Move to `path` without recording a redirect.
    pub fn navigate(&self, path: impl Into<String>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.into());
    }

    /// Every redirect so far, in order.
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
        self.navigate(path);
    }
}
