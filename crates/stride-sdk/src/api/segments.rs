//! Segments and personal records.

use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{Record, StrideClient};

/// Segment endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SegmentsApi<'a> {
    client: &'a StrideClient,
}

impl<'a> SegmentsApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    /// Tracked segments.
    pub async fn list(&self) -> Outcome<Record> {
        self.client
            .cached_get(QueryKey::from(["segments"]), RequestDescriptor::get("/segments"))
            .await
    }

    /// Search segments by name.
    pub async fn search(&self, query: &str) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["segments", "search"]).with(query),
                RequestDescriptor::get("/segments/search").query("q", query),
            )
            .await
    }

    /// Start tracking a segment.
    pub async fn track(&self, segment_id: &str) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::post(format!("/segments/{segment_id}/track")),
                &[QueryKey::from(["segments"])],
            )
            .await
    }

    /// Personal records across tracked segments.
    pub async fn prs(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["segments", "prs"]),
                RequestDescriptor::get("/segments/prs"),
            )
            .await
    }
}
