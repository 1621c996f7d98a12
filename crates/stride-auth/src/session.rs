//! Session store.

use std::sync::Arc;

use stride_cache::{KeyValueStore, MemoryStore, QueryCache, StoreError};

use crate::user::UserRecord;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user identity.
pub const USER_KEY: &str = "user";

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Bearer token, if signed in.
    pub token: Option<String>,
    /// Cached user identity. May be absent while a token exists.
    pub user: Option<UserRecord>,
}

impl Session {
    /// Whether a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Single source of truth for the authentication credential.
///
/// Clones share the same backing store. Nothing is read until first access,
/// and there is no expiry timer: expiry is only learned when the service
/// rejects a request.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    cache: Option<QueryCache>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("cache", &self.cache.is_some())
            .finish()
    }
}

impl SessionStore {
    /// Create a session store over a persistent store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store, cache: None }
    }

    /// Create a session store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Link a query cache that is cleared together with the session.
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Persist a token and user together.
    ///
    /// If the token cannot be written the user entry is rolled back, so a
    /// failed call never leaves a user without a token.
    pub fn set_session(&self, token: &str, user: &UserRecord) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &user_json)?;
        if let Err(e) = self.store.set(TOKEN_KEY, token) {
            let _ = self.store.remove(USER_KEY);
            return Err(e);
        }
        tracing::info!(user = %user.id, "session established");
        Ok(())
    }

    /// Replace the cached user identity, keeping the token.
    pub fn set_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &user_json)
    }

    /// Get the bearer token. An empty stored token counts as absent.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Get the cached user. Unparsable data counts as absent.
    pub fn user(&self) -> Option<UserRecord> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparsable stored user");
                None
            }
        }
    }

    /// Read token and user together.
    pub fn snapshot(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }

    /// Whether a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Remove the credential, the user, and every cached resource.
    ///
    /// Storage failures are logged; the linked cache is cleared regardless.
    pub fn clear_session(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove session entry");
            }
        }
        if let Some(cache) = &self.cache {
            cache.clear();
        }
        tracing::info!("session cleared");
    }
}

#[cfg(test)]
mod tests {
    use stride_cache::QueryKey;

    use super::*;

    fn user() -> UserRecord {
        UserRecord::new("1", "runner@example.com").with_name("Runner")
    }

    #[test]
    fn test_empty_session() {
        let session = SessionStore::in_memory();
        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
        assert!(!session.is_authenticated());
        assert_eq!(session.snapshot(), Session::default());
    }

    #[test]
    fn test_set_and_read_session() {
        let session = SessionStore::in_memory();
        session.set_session("tok", &user()).unwrap();

        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user(), Some(user()));
        assert!(session.snapshot().is_authenticated());
    }

    #[test]
    fn test_clones_observe_same_session() {
        let session = SessionStore::in_memory();
        let other = session.clone();

        session.set_session("tok", &user()).unwrap();
        assert_eq!(other.token().as_deref(), Some("tok"));

        other.clear_session();
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_corrupted_user_is_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "{broken").unwrap();

        let session = SessionStore::new(store);
        assert_eq!(session.user(), None);
        // A token without a cached user still counts as signed in.
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(TOKEN_KEY, "").unwrap();
        assert!(!SessionStore::new(store).is_authenticated());
    }

    #[test]
    fn test_set_user_keeps_token() {
        let session = SessionStore::in_memory();
        session.set_session("tok", &user()).unwrap();

        let renamed = user().with_name("Renamed");
        session.set_user(&renamed).unwrap();

        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.user().unwrap().display_name(), "Renamed");
    }

    #[tokio::test]
    async fn test_clear_drops_linked_cache() {
        let cache = QueryCache::new();
        let session = SessionStore::in_memory().with_cache(cache.clone());
        session.set_session("tok", &user()).unwrap();
        cache.set(&QueryKey::from(["profile"]), &"private").unwrap();

        session.clear_session();

        assert_eq!(session.snapshot(), Session::default());
        assert!(cache.is_empty());
    }
}
