//! The HTTP gateway: single choke point for every outbound call.

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use stride_auth::SessionStore;

use crate::classify::classify;
use crate::config::GatewayConfig;
use crate::error::{ApiError, ErrorKind, Outcome, TransportError};
use crate::navigator::{Navigator, NoopNavigator};
use crate::request::{HttpRequest, RequestDescriptor};
use crate::response::Response;
use crate::transport::{ReqwestTransport, Transport};

/// Sends requests, attaches the session credential and classifies failures.
///
/// The gateway holds no per-call state; clones share transport, session and
/// navigator, so calls run concurrently and all observe the same session.
#[derive(Clone)]
pub struct Gateway {
    config: Arc<GatewayConfig>,
    transport: Arc<dyn Transport>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    redirect_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("session", &self.session)
            .finish()
    }
}

impl Gateway {
    /// Create a gateway over the `reqwest` transport.
    pub fn new(config: GatewayConfig, session: SessionStore) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            config,
            session,
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// Create a gateway over a custom transport.
    pub fn with_transport(
        config: GatewayConfig,
        session: SessionStore,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            session,
            navigator: Arc::new(NoopNavigator),
            redirect_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Set the navigator used for session-expiry redirects.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// The gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The session store credentials are read from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Send a request and decode a JSON success body.
    pub async fn send<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Outcome<T> {
        self.send_raw(descriptor).await?.json()
    }

    /// Send a request and return the raw success response.
    ///
    /// Every non-2xx response and every transport failure comes back as a
    /// classified `ApiError`. Only an authentication failure mutates state:
    /// it clears the session and redirects to the login entry point.
    pub async fn send_raw(&self, descriptor: RequestDescriptor) -> Outcome<Response> {
        let mut attempt = 0;
        loop {
            let error = match self.execute_once(&descriptor).await {
                Ok(response) if response.is_success() => {
                    tracing::trace!(
                        method = %descriptor.method,
                        path = %descriptor.path,
                        status = response.status,
                        "request succeeded"
                    );
                    return Ok(response);
                }
                Ok(response) => classify(Ok(&response)),
                Err(e) => classify(Err(&e)),
            };

            if self.config.retry.should_retry(&descriptor, &error.kind, attempt) {
                attempt += 1;
                tracing::debug!(
                    method = %descriptor.method,
                    path = %descriptor.path,
                    kind = %error.kind,
                    attempt,
                    "retrying request"
                );
                continue;
            }

            tracing::warn!(
                method = %descriptor.method,
                path = %descriptor.path,
                kind = %error.kind,
                status = ?error.status,
                "request failed"
            );
            self.handle_failure(&error);
            return Err(error);
        }
    }

    async fn execute_once(&self, descriptor: &RequestDescriptor) -> Result<Response, TransportError> {
        let request = self.build_request(descriptor)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            authenticated = request.header("Authorization").is_some(),
            "sending request"
        );

        match tokio::time::timeout(self.config.timeout, self.transport.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(self.config.timeout)),
        }
    }

    fn build_request(&self, descriptor: &RequestDescriptor) -> Result<HttpRequest, TransportError> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];

        // Read on every attempt so an invalidation by a concurrent call is seen.
        // A missing token is not a reason to skip the call: the service decides.
        if descriptor.requires_auth {
            if let Some(token) = self.session.token() {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }

        let body = match &descriptor.body {
            Some(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(
                    serde_json::to_vec(value)
                        .map_err(|e| TransportError::Request(e.to_string()))?,
                )
            }
            None => None,
        };

        Ok(HttpRequest {
            method: descriptor.method.clone(),
            url: self.config.url_for(&descriptor.path),
            query: descriptor.query.clone(),
            headers,
            body,
        })
    }

    fn handle_failure(&self, error: &ApiError) {
        if error.kind != ErrorKind::AuthenticationExpired {
            return;
        }

        self.session.clear_session();

        let _guard = self.redirect_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let login = self.config.login_path.as_str();
        if self.navigator.current_path().as_deref() == Some(login) {
            tracing::debug!("already at login, not redirecting");
            return;
        }
        tracing::info!(to = login, "session expired, redirecting to login");
        self.navigator.redirect(login);
    }
}
