//! Client configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stride_cache::{CachePolicy, QueryCache, QueryKey, DEFAULT_RETAIN_FOR, DEFAULT_STALE_AFTER};
use stride_data::{GatewayConfig, RetryPolicy, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT};
use thiserror::Error;

/// Environment variable holding the service base URL.
pub const API_URL_ENV: &str = "STRIDE_API_URL";

/// Environment variable overriding the per-call timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "STRIDE_TIMEOUT_MS";

/// Environment variable overriding the retry count.
pub const RETRY_ENV: &str = "STRIDE_RETRY_COUNT";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service base URL; request paths are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms", alias = "timeout")]
    pub timeout_ms: u64,

    /// Retries for idempotent requests that hit a network or server error.
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Location the user is sent to when the session expires.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Query cache windows.
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_retry_count() -> u32 {
    1
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_count: default_retry_count(),
            login_path: default_login_path(),
            cache: CacheConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config for a base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load config from a TOML file, or JSON when the path ends in `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Default config with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env()
    }

    /// Apply `STRIDE_API_URL`, `STRIDE_TIMEOUT_MS` and `STRIDE_RETRY_COUNT`.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.timeout_ms = parse_number(TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(RETRY_ENV) {
            self.retry_count = parse_number(RETRY_ENV, &raw)?;
        }
        Ok(self)
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the retry count.
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Gateway settings derived from this config.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(&self.base_url)
            .with_timeout(self.timeout())
            .with_retry(RetryPolicy::new(self.retry_count))
            .with_login_path(&self.login_path)
    }

    /// Build an empty query cache with the configured windows.
    pub fn build_cache(&self) -> QueryCache {
        self.cache.build()
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Query cache windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default staleness window in seconds.
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,

    /// Default retention window in seconds.
    #[serde(default = "default_retain_for_secs")]
    pub retain_for_secs: u64,

    /// Windows for specific key prefixes, e.g. `"strava/activities"`.
    #[serde(default)]
    pub overrides: BTreeMap<String, PolicyOverride>,
}

fn default_stale_after_secs() -> u64 {
    DEFAULT_STALE_AFTER.as_secs()
}

fn default_retain_for_secs() -> u64 {
    DEFAULT_RETAIN_FOR.as_secs()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: default_stale_after_secs(),
            retain_for_secs: default_retain_for_secs(),
            overrides: BTreeMap::new(),
        }
    }
}

impl CacheConfig {
    /// The default policy.
    pub fn policy(&self) -> CachePolicy {
        CachePolicy::new(
            Duration::from_secs(self.stale_after_secs),
            Duration::from_secs(self.retain_for_secs),
        )
    }

    /// Build a query cache with the default policy and every override.
    pub fn build(&self) -> QueryCache {
        let default = self.policy();
        self.overrides
            .iter()
            .fold(QueryCache::with_policy(default), |cache, (prefix, o)| {
                cache.with_override(QueryKey::from(prefix.as_str()), o.apply(default))
            })
    }
}

/// Policy for one key prefix. Unset fields inherit the defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolicyOverride {
    /// Staleness window in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_after_secs: Option<u64>,

    /// Retention window in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retain_for_secs: Option<u64>,
}

impl PolicyOverride {
    fn apply(&self, base: CachePolicy) -> CachePolicy {
        CachePolicy::new(
            self.stale_after_secs
                .map(Duration::from_secs)
                .unwrap_or(base.stale_after),
            self.retain_for_secs
                .map(Duration::from_secs)
                .unwrap_or(base.retain_for),
        )
    }
}
