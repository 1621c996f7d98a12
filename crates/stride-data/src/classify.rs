//! Mapping from transport outcomes to the failure taxonomy.

use serde::Deserialize;

use crate::error::{ApiError, ErrorKind, TransportError};
use crate::response::Response;

const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";
const AUTH_MESSAGE: &str = "Your session has expired. Please log in again.";
const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
const VALIDATION_MESSAGE: &str = "Please check your input and try again.";
const SERVER_MESSAGE: &str = "Server error. Please try again later.";
const UNKNOWN_MESSAGE: &str = "An unexpected error occurred.";

/// Error body shapes the service is known to produce.
///
/// Recognized: `{ "detail": "..." }`, `{ "detail": [{ "msg": "..." }, ...] }`
/// and `{ "message": "..." }`. Anything else yields no message.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parse an error body. Unrecognized bodies parse as empty.
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// The single server-provided message, if any.
    pub fn message(&self) -> Option<String> {
        let detail = self.detail.as_ref().and_then(|d| d.as_str());
        let message = self.message.as_ref().and_then(|m| m.as_str());
        detail
            .or(message)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
    }

    /// Every `msg` in a list-shaped `detail`, in order.
    pub fn field_messages(&self) -> Vec<String> {
        match &self.detail {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Classify a failed call.
///
/// Total over every input: a missing response, any status code, and any
/// body shape each produce exactly one `ApiError`. Success statuses passed
/// here classify as `Unknown`; callers only hand over failures.
pub fn classify(outcome: Result<&Response, &TransportError>) -> ApiError {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, "no response received");
            return ApiError::new(ErrorKind::NetworkUnavailable, NETWORK_MESSAGE);
        }
    };

    let status = response.status;
    let body = ErrorBody::parse(&response.body);
    let server_message = body.message();

    let error = match status {
        401 => ApiError::new(
            ErrorKind::AuthenticationExpired,
            server_message.unwrap_or_else(|| AUTH_MESSAGE.to_string()),
        ),
        403 => ApiError::new(
            ErrorKind::Forbidden,
            server_message.unwrap_or_else(|| FORBIDDEN_MESSAGE.to_string()),
        ),
        404 => ApiError::new(
            ErrorKind::NotFound,
            server_message.unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
        ),
        422 => {
            let mut messages = body.field_messages();
            if messages.is_empty() {
                messages.extend(server_message);
            }
            let message = if messages.is_empty() {
                VALIDATION_MESSAGE.to_string()
            } else {
                messages.join(", ")
            };
            ApiError::new(ErrorKind::ValidationFailed(messages), message)
        }
        500 => ApiError::new(
            ErrorKind::ServerError,
            server_message.unwrap_or_else(|| SERVER_MESSAGE.to_string()),
        ),
        _ => {
            let transport_message = http::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(|reason| format!("Request failed: {} {}", status, reason));
            ApiError::new(
                ErrorKind::Unknown,
                server_message
                    .or(transport_message)
                    .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
            )
        }
    };

    error.with_status(status)
}
