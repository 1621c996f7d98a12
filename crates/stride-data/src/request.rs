//! Request descriptors.

use http::Method;
use serde::Serialize;

/// Describes one call to the service, before credentials are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured base URL.
    pub path: String,
    /// Query string parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
    /// Whether to attach the session token. Defaults to `true`.
    pub requires_auth: bool,
}

impl RequestDescriptor {
    /// Create a descriptor for an authenticated call.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: true,
        }
    }

    /// Create a GET descriptor.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST descriptor.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT descriptor.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a PATCH descriptor.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Create a DELETE descriptor.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(value)?);
        Ok(self)
    }

    /// Send without the session token.
    pub fn unauthenticated(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Whether the call may be repeated without side effects.
    pub fn is_idempotent(&self) -> bool {
        matches!(self.method, Method::GET | Method::HEAD | Method::OPTIONS)
    }
}

/// A fully resolved request, as handed to a `Transport`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// Encoded body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_to_authenticated() {
        let req = RequestDescriptor::get("/profile");
        assert_eq!(req.method, Method::GET);
        assert!(req.requires_auth);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_unauthenticated() {
        let req = RequestDescriptor::post("/auth/login").unauthenticated();
        assert!(!req.requires_auth);
    }

    #[test]
    fn test_query_preserves_order() {
        let req = RequestDescriptor::get("/strava/activities")
            .query("page", 2)
            .query("per_page", 30);
        assert_eq!(
            req.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "30".to_string())
            ]
        );
    }

    #[test]
    fn test_json_body() {
        let req = RequestDescriptor::post("/goals")
            .json(&json!({"race_distance": "10k"}))
            .unwrap();
        assert_eq!(req.body, Some(json!({"race_distance": "10k"})));
    }

    #[test]
    fn test_idempotence() {
        assert!(RequestDescriptor::get("/goals").is_idempotent());
        assert!(!RequestDescriptor::post("/goals").is_idempotent());
        assert!(!RequestDescriptor::put("/profile").is_idempotent());
        assert!(!RequestDescriptor::delete("/goals/1").is_idempotent());
    }
}
