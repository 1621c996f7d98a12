//! Failure taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Closed set of failure kinds every call resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received (connection failure or timeout).
    NetworkUnavailable,
    /// The service rejected the credential (HTTP 401).
    AuthenticationExpired,
    /// The credential lacks permission (HTTP 403).
    Forbidden,
    /// The resource does not exist (HTTP 404).
    NotFound,
    /// The payload was rejected (HTTP 422), with every per-field message.
    ValidationFailed(Vec<String>),
    /// The service failed (HTTP 500).
    ServerError,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Short stable name, for logs and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NetworkUnavailable => "network_unavailable",
            Self::AuthenticationExpired => "authentication_expired",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::ValidationFailed(_) => "validation_failed",
            Self::ServerError => "server_error",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the view may offer a retry affordance for this failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkUnavailable | Self::ServerError | Self::Unknown
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// The failure kind.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
}

impl ApiError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Attach the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Per-field messages for a validation failure, empty otherwise.
    pub fn validation_messages(&self) -> &[String] {
        match &self.kind {
            ErrorKind::ValidationFailed(messages) => messages,
            _ => &[],
        }
    }

    /// Whether the view may offer a retry affordance.
    pub fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::new(ErrorKind::Unknown, format!("JSON error: {}", e))
    }
}

/// Result of a gateway call: the payload, or a classified failure.
pub type Outcome<T> = Result<T, ApiError>;

/// Transport failure where no HTTP response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The call did not finish within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request failed before a complete response arrived.
    #[error("Request failed: {0}")]
    Request(String),
}
