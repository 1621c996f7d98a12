//! Training goals.

use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{Record, StrideClient};

/// Goal endpoints.
#[derive(Debug, Clone, Copy)]
pub struct GoalsApi<'a> {
    client: &'a StrideClient,
}

impl<'a> GoalsApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    /// List all goals.
    pub async fn list(&self) -> Outcome<Record> {
        self.client
            .cached_get(QueryKey::from(["goals"]), RequestDescriptor::get("/goals"))
            .await
    }

    /// Fetch the primary goal.
    pub async fn primary(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["goals", "primary"]),
                RequestDescriptor::get("/goals/primary"),
            )
            .await
    }

    /// Create a goal.
    pub async fn create(&self, goal: &Record) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::post("/goals").json(goal)?,
                &[QueryKey::from(["goals"])],
            )
            .await
    }
}
