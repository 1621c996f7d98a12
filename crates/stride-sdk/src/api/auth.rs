//! Sign-in, registration and the current user.

use serde::{Deserialize, Serialize};
use stride_auth::{AuthResponse, UserRecord};
use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{store_failure, StrideClient};

/// Login request body.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Login credentials for the new account.
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl Registration {
    /// Create a registration.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            full_name: None,
        }
    }

    /// Set the display name.
    pub fn with_full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }
}

/// Authentication endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a StrideClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    /// Sign in and establish the session.
    pub async fn login(&self, credentials: &Credentials) -> Outcome<UserRecord> {
        let descriptor = RequestDescriptor::post("/auth/login")
            .json(credentials)?
            .unauthenticated();
        self.establish(descriptor).await
    }

    /// Create an account and establish the session.
    pub async fn register(&self, registration: &Registration) -> Outcome<UserRecord> {
        let descriptor = RequestDescriptor::post("/auth/register")
            .json(registration)?
            .unauthenticated();
        self.establish(descriptor).await
    }

    /// Fetch the signed-in user and refresh the stored identity.
    pub async fn me(&self) -> Outcome<UserRecord> {
        let record = self
            .client
            .cached_get(QueryKey::from(["auth", "me"]), RequestDescriptor::get("/auth/me"))
            .await?;
        let user: UserRecord = serde_json::from_value(record)?;
        if let Err(e) = self.client.session().set_user(&user) {
            tracing::warn!(error = %e, "failed to store refreshed user");
        }
        Ok(user)
    }

    /// Sign out locally. Drops the credential and every cached resource.
    pub fn logout(&self) {
        self.client.session().clear_session();
    }

    async fn establish(&self, descriptor: RequestDescriptor) -> Outcome<UserRecord> {
        let auth: AuthResponse = self.client.gateway().send(descriptor).await?;
        // Resources cached under a previous identity must not leak into this one.
        self.client.cache().clear();
        self.client
            .session()
            .set_session(&auth.access_token, &auth.user)
            .map_err(store_failure)?;
        Ok(auth.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_body() {
        let body = serde_json::to_value(
            Registration::new(Credentials::new("a@b.co", "pw")).with_full_name("Ada"),
        )
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "a@b.co", "password": "pw", "full_name": "Ada"})
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("a@b.co", "hunter2"));
        assert!(debug.contains("a@b.co"));
        assert!(!debug.contains("hunter2"));
    }
}
