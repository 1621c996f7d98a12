//! Training analytics. Read-only; coach mutations invalidate these.

use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{Record, StrideClient};

/// Training analytics endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsApi<'a> {
    client: &'a StrideClient,
}

impl<'a> AnalyticsApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, resource: &str) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["analytics", resource]),
                RequestDescriptor::get(format!("/analytics/{resource}")),
            )
            .await
    }

    /// Current form (fitness minus fatigue).
    pub async fn form_status(&self) -> Outcome<Record> {
        self.fetch("form-status").await
    }

    /// Fatigue breakdown.
    pub async fn fatigue_analysis(&self) -> Outcome<Record> {
        self.fetch("fatigue-analysis").await
    }

    /// Predicted race times.
    pub async fn race_prediction(&self) -> Outcome<Record> {
        self.fetch("race-prediction").await
    }

    /// Fitness summary.
    pub async fn fitness_summary(&self) -> Outcome<Record> {
        self.fetch("fitness-summary").await
    }

    /// Fitness history over the last `days` days.
    pub async fn fitness_timeline(&self, days: u32) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["analytics", "fitness-timeline"]).with(days.to_string()),
                RequestDescriptor::get("/analytics/fitness-timeline").query("days", days),
            )
            .await
    }
}
