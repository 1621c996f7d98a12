//! Coaching profile, weekly plans and training zones.

use stride_cache::QueryKey;
use stride_data::{Outcome, RequestDescriptor};

use crate::client::{Record, StrideClient};

/// Coaching endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CoachApi<'a> {
    client: &'a StrideClient,
}

/// Zones and the coaching profile drive every analytics figure.
fn coaching_inputs() -> [QueryKey; 2] {
    [QueryKey::from(["coach"]), QueryKey::from(["analytics"])]
}

impl<'a> CoachApi<'a> {
    pub(crate) fn new(client: &'a StrideClient) -> Self {
        Self { client }
    }

    /// Fetch the coaching profile.
    pub async fn profile(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["coach", "profile"]),
                RequestDescriptor::get("/coach/profile"),
            )
            .await
    }

    /// Update the coaching profile.
    pub async fn update_profile(&self, profile: &Record) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::put("/coach/profile").json(profile)?,
                &coaching_inputs(),
            )
            .await
    }

    /// Fetch the current weekly plan.
    pub async fn weekly_plan(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["coach", "weekly-plan"]),
                RequestDescriptor::get("/coach/weekly-plan"),
            )
            .await
    }

    /// Generate a new weekly plan.
    pub async fn generate_weekly_plan(&self, request: &Record) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::post("/coach/weekly-plan/generate").json(request)?,
                &[QueryKey::from(["coach", "weekly-plan"])],
            )
            .await
    }

    /// Export the weekly plan in `format` (e.g. `ics`, `pdf`). Returns raw bytes.
    pub async fn export_weekly_plan(&self, format: &str) -> Outcome<Vec<u8>> {
        let response = self
            .client
            .gateway()
            .send_raw(RequestDescriptor::get("/coach/weekly-plan/export").query("format", format))
            .await?;
        Ok(response.bytes().to_vec())
    }

    /// Email the weekly plan to the athlete.
    pub async fn email_weekly_plan(&self, request: &Record) -> Outcome<Record> {
        self.client
            .send(RequestDescriptor::post("/coach/weekly-plan/email").json(request)?)
            .await
    }

    /// Current training zones.
    pub async fn zones(&self) -> Outcome<Record> {
        self.client
            .cached_get(
                QueryKey::from(["coach", "zones"]),
                RequestDescriptor::get("/coach/zones"),
            )
            .await
    }

    /// Derive zones automatically from recent activities.
    pub async fn auto_zones(&self) -> Outcome<Record> {
        self.client
            .mutate(RequestDescriptor::post("/coach/zones/auto"), &coaching_inputs())
            .await
    }

    /// Set zones by hand.
    pub async fn set_manual_zones(&self, zones: &Record) -> Outcome<Record> {
        self.client
            .mutate(
                RequestDescriptor::put("/coach/zones/manual").json(zones)?,
                &coaching_inputs(),
            )
            .await
    }
}
