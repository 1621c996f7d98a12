//! HTTP transports.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::HttpRequest;
use crate::response::Response;

/// Sends resolved requests.
///
/// Returns `Ok` for every response that arrived, whatever its status; `Err`
/// only when no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request.
    async fn execute(&self, request: HttpRequest) -> Result<Response, TransportError>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stride/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Response, TransportError> {
        let mut builder = self.client.request(request.method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(Response::new(status, headers, body.to_vec()))
    }
}
