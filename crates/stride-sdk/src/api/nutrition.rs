//! Nutrition targets and meal plans.

use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{Record, StrideClient};

/// Nutrition endpoints.
#[derive(Debug, Clone, Copy)]
pub struct NutritionApi<'a> {
    client: &'a StrideClient,
}

impl<'a> NutritionApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    /// Daily targets.
    pub async fn targets(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["nutrition", "targets"]),
                RequestDescriptor::get("/nutrition/targets"),
            )
            .await
    }

    /// Update daily targets.
    pub async fn update_targets(&self, targets: &Record) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::put("/nutrition/targets").json(targets)?,
                &[QueryKey::from(["nutrition"])],
            )
            .await
    }

    /// Saved meal plans.
    pub async fn plans(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["nutrition", "plans"]),
                RequestDescriptor::get("/nutrition/plans"),
            )
            .await
    }

    /// Generate a meal plan.
    pub async fn generate_plan(&self, request: &Record) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::post("/nutrition/plans/generate").json(request)?,
                &[QueryKey::from(["nutrition"])],
            )
            .await
    }
}
