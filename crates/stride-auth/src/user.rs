//! User identity records.

use serde::{Deserialize, Deserializer, Serialize};

/// User identifier.
///
/// The service may issue numeric or string ids; both are kept as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Identity of the signed-in user.
///
/// Fields beyond id, email and display name are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    #[serde(default, alias = "full_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Any other fields the service returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    /// Create a user record.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            email: email.into(),
            name: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name to show for this user, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Body returned by the login and registration endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// The authenticated user.
    pub user: UserRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        let user: UserRecord =
            serde_json::from_str(r#"{"id": 42, "email": "a@b.c"}"#).unwrap();
        assert_eq!(user.id.as_str(), "42");
        assert_eq!(user.display_name(), "a@b.c");
    }

    #[test]
    fn test_full_name_alias_and_extra_fields() {
        let user: UserRecord = serde_json::from_str(
            r#"{"id": "u1", "email": "a@b.c", "full_name": "Ada", "is_active": true}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Ada");
        assert_eq!(user.extra.get("is_active"), Some(&serde_json::Value::Bool(true)));
    }

    #[test]
    fn test_auth_response() {
        let resp: AuthResponse = serde_json::from_str(
            r#"{"access_token": "tok", "token_type": "bearer", "user": {"id": 1, "email": "a@b.c"}}"#,
        )
        .unwrap();
        assert_eq!(resp.access_token, "tok");
        assert_eq!(resp.user.email, "a@b.c");
    }
}
