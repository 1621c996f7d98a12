//! Terminal rendering of session-expiry redirects.

use std::sync::{Mutex, PoisonError};

use stride_sdk::Navigator;

use crate::output::Output;

/// Tracks which command "screen" is active and turns a redirect to the
/// login entry point into a notice.
#[derive(Debug)]
pub struct TerminalNavigator {
    current: Mutex<Option<String>>,
    output: Output,
}

impl TerminalNavigator {
    /// Create a navigator with no active location.
    pub fn new(output: Output) -> Self {
        Self {
            current: Mutex::new(None),
            output,
        }
    }

    /// Mark `path` as the active location.
    pub fn navigate(&self, path: impl Into<String>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.into());
    }
}

impl Navigator for TerminalNavigator {
    fn current_path(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn redirect(&self, path: &str) {
        self.navigate(path);
        self.output
            .warn("Your session has expired. Run `stride login` to sign in again.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_moves_to_target() {
        let nav = TerminalNavigator::new(Output::new(false, true));
        nav.navigate("/dashboard");
        nav.redirect("/login");
        assert_eq!(nav.current_path().as_deref(), Some("/login"));
    }
}
