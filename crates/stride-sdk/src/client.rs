//! The stride client.

use std::sync::Arc;

use stride_auth::SessionStore;
use stride_cache::{KeyPattern, KeyValueStore, QueryCache, QueryKey};
use stride_data::{
    ApiError, ErrorKind, Gateway, Navigator, Outcome, RequestDescriptor, Transport,
    TransportError,
};

use crate::api::{
    AnalyticsApi, AuthApi, CoachApi, GoalsApi, NutritionApi, ProfileApi, SegmentsApi, StravaApi,
};
use crate::config::ClientConfig;

/// Opaque domain payload.
pub type Record = serde_json::Value;

/// Client for the stride coaching service.
///
/// Owns one query cache and one session store, both shared with the
/// gateway. Clones share all three, so a clone can be moved into a
/// spawned fetch.
#[derive(Debug, Clone)]
pub struct StrideClient {
    gateway: Gateway,
    cache: QueryCache,
}

impl StrideClient {
    /// Create a client over the `reqwest` transport.
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, TransportError> {
        let cache = config.build_cache();
        let session = SessionStore::new(store).with_cache(cache.clone());
        let gateway = Gateway::new(config.gateway_config(), session)?.with_navigator(navigator);
        Ok(Self { gateway, cache })
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        config: &ClientConfig,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let cache = config.build_cache();
        let session = SessionStore::new(store).with_cache(cache.clone());
        let gateway = Gateway::with_transport(config.gateway_config(), session, transport)
            .with_navigator(navigator);
        Self { gateway, cache }
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// The shared query cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// The session store.
    pub fn session(&self) -> &SessionStore {
        self.gateway.session()
    }

    /// Authentication endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Athlete profile endpoints.
    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    /// Goal endpoints.
    pub fn goals(&self) -> GoalsApi<'_> {
        GoalsApi::new(self)
    }

    /// Coaching endpoints.
    pub fn coach(&self) -> CoachApi<'_> {
        CoachApi::new(self)
    }

    /// Training analytics endpoints.
    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }

    /// Strava integration endpoints.
    pub fn strava(&self) -> StravaApi<'_> {
        StravaApi::new(self)
    }

    /// Nutrition endpoints.
    pub fn nutrition(&self) -> NutritionApi<'_> {
        NutritionApi::new(self)
    }

    /// Segment endpoints.
    pub fn segments(&self) -> SegmentsApi<'_> {
        SegmentsApi::new(self)
    }

    /// GET a resource through the query cache.
    pub async fn cached_get(
        &self,
        key: QueryKey,
        descriptor: RequestDescriptor,
    ) -> Outcome<Record> {
        self.cache
            .fetch_with(&key, || self.gateway.send::<Record>(descriptor))
            .await
    }

    /// Send a mutation and, on success, invalidate every key under `prefixes`.
    pub async fn mutate(
        &self,
        descriptor: RequestDescriptor,
        prefixes: &[QueryKey],
    ) -> Outcome<Record> {
        let record = self.gateway.send::<Record>(descriptor).await?;
        for prefix in prefixes {
            let dropped = self.cache.invalidate(&KeyPattern::prefix(prefix.clone()));
            tracing::debug!(prefix = %prefix, dropped, "invalidated after mutation");
        }
        Ok(record)
    }

    /// Send a request without caching or invalidation.
    pub async fn send(&self, descriptor: RequestDescriptor) -> Outcome<Record> {
        self.gateway.send(descriptor).await
    }
}

/// Map a session persistence failure onto the error taxonomy.
pub(crate) fn store_failure(e: stride_auth::StoreError) -> ApiError {
    ApiError::new(
        ErrorKind::Unknown,
        format!("Could not save the session: {e}"),
    )
}
