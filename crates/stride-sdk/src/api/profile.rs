//! Athlete profile.

use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{Record, StrideClient};

/// Athlete profile endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ProfileApi<'a> {
    client: &'a StrideClient,
}

impl<'a> ProfileApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    /// Fetch the athlete profile.
    pub async fn get(&self) -> Outcome<Record> {
        self.client
            .cached_get(QueryKey::from(["profile"]), RequestDescriptor::get("/profile"))
            .await
    }

    /// Update the athlete profile. Also refreshes the current user.
    pub async fn update(&self, profile: &Record) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::put("/profile").json(profile)?,
                &[QueryKey::from(["profile"]), QueryKey::from(["auth", "me"])],
            )
            .await
    }
}
