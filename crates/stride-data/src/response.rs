//! HTTP response handling.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorKind};

/// An HTTP response as received from the transport.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, ApiError> {
        String::from_utf8(self.body.clone()).map_err(|e| {
            ApiError::new(ErrorKind::Unknown, format!("Invalid UTF-8: {}", e))
                .with_status(self.status)
        })
    }

    /// Parse the response body as JSON.
    ///
    /// An empty body (e.g. `204 No Content`) parses as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body).map_err(|e| {
            ApiError::new(
                ErrorKind::Unknown,
                format!("Failed to parse response: {}", e),
            )
            .with_status(self.status)
        })
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        // Case-insensitive header lookup
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }
}
