//! Strava integration.

use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{Record, StrideClient};

/// Strava integration endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StravaApi<'a> {
    client: &'a StrideClient,
}

impl<'a> StravaApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    /// Connection status.
    pub async fn status(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["strava", "status"]),
                RequestDescriptor::get("/strava/status"),
            )
            .await
    }

    /// One page of synced activities.
    pub async fn activities(&self, page: u32, per_page: u32) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["strava", "activities"])
                    .with(page.to_string())
                    .with(per_page.to_string()),
                RequestDescriptor::get("/strava/activities")
                    .query("page", page)
                    .query("per_page", per_page),
            )
            .await
    }
}
