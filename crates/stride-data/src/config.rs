//! Gateway configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default login entry point the user is sent to when the session expires.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL every path is resolved against.
    pub base_url: String,
    /// Per-call timeout; expiry counts as a network failure.
    pub timeout: Duration,
    /// Retry policy.
    pub retry: RetryPolicy,
    /// Login entry point for session-expiry redirects.
    pub login_path: String,
}

impl GatewayConfig {
    /// Create a configuration with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the login entry point.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Resolve a path against the base URL.
    pub fn url_for(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }
}

/// Join a base URL and a path with exactly one `/`.
///
/// Absolute `http://` and `https://` paths are returned unchanged.
pub fn resolve_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}
