//! HTTP gateway for the stride client.
//!
//! This crate provides:
//! - `Gateway` - Single choke point for outbound calls
//! - `RequestDescriptor` - Method, path, payload and auth requirement
//! - `ErrorKind` / `ApiError` / `classify` - Closed failure taxonomy
//! - `Transport` - Pluggable HTTP transport (`ReqwestTransport` in production)
//! - `Navigator` - Hook used to send the user to the login entry point
//! - `RetryPolicy` - Single configurable retry count
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_data::{Gateway, GatewayConfig, RequestDescriptor};
//!
//! let gateway = Gateway::new(GatewayConfig::new("https://api.example.com"), session)?;
//!
//! let goals: serde_json::Value = gateway.send(RequestDescriptor::get("/goals")).await?;
//! ```

mod classify;
mod config;
mod error;
mod gateway;
mod navigator;
mod request;
mod response;
mod retry;
mod transport;

pub use classify::{classify, ErrorBody};
pub use config::{resolve_url, GatewayConfig, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT};
pub use error::{ApiError, ErrorKind, Outcome, TransportError};
pub use gateway::Gateway;
pub use navigator::{Navigator, NoopNavigator, RecordingNavigator};
pub use request::{HttpRequest, RequestDescriptor};
pub use response::Response;
pub use retry::{RetryCondition, RetryPolicy};
pub use transport::{ReqwestTransport, Transport};

pub use http::Method;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiError, ErrorKind, Gateway, GatewayConfig, Outcome, RequestDescriptor};
}
