//! Multi-resource view loads.

use stride_data::Outcome;
use stride_executor::{LoadResult, Loader, Resource, ViewScope};

use crate::client::{Record, StrideClient};

/// Dashboard resource names.
pub mod dashboard_resources {
    // Critical.
    pub const FORM_STATUS: &str = "form-status";
    pub const FITNESS_SUMMARY: &str = "fitness-summary";

    // Optional.
    pub const FATIGUE_ANALYSIS: &str = "fatigue-analysis";
    pub const RACE_PREDICTION: &str = "race-prediction";
    pub const TRAINING_ZONES: &str = "training-zones";
    pub const PRIMARY_GOAL: &str = "primary-goal";
}

use dashboard_resources::*;

/// A rendered dashboard.
///
/// Form status and fitness summary are always present; the rest are
/// `None` when their fetch failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Current form (fitness minus fatigue).
    pub form_status: Record,
    /// Fitness summary.
    pub fitness_summary: Record,
    /// Fatigue breakdown.
    pub fatigue_analysis: Option<Record>,
    /// Predicted race times.
    pub race_prediction: Option<Record>,
    /// Training zones from the coaching profile.
    pub training_zones: Option<Record>,
    /// The athlete's primary goal.
    pub primary_goal: Option<Record>,
    /// Names of optional resources that failed to load.
    pub degraded: Vec<String>,
}

impl Dashboard {
    /// Assemble a dashboard, or the first blocking error.
    pub fn from_result(mut result: LoadResult<Record>) -> Outcome<Self> {
        if let Some(e) = result.blocking_error() {
            return Err(e.clone());
        }
        let degraded = result.degraded().into_iter().map(String::from).collect();
        let mut optional = |name: &str| result.take(name).and_then(Result::ok);

        let fatigue_analysis = optional(FATIGUE_ANALYSIS);
        let race_prediction = optional(RACE_PREDICTION);
        let training_zones = optional(TRAINING_ZONES);
        let primary_goal = optional(PRIMARY_GOAL);
        let form_status = optional(FORM_STATUS).unwrap_or_default();
        let fitness_summary = optional(FITNESS_SUMMARY).unwrap_or_default();

        Ok(Self {
            form_status,
            fitness_summary,
            fatigue_analysis,
            race_prediction,
            training_zones,
            primary_goal,
            degraded,
        })
    }
}

/// Load every dashboard resource concurrently.
///
/// Returns `None` if `scope` was torn down first. The fetches still
/// complete and populate the cache.
pub async fn dashboard(client: &StrideClient, scope: &ViewScope) -> Option<LoadResult<Record>> {
    let c = client.clone();
    let form_status = Resource::critical(FORM_STATUS, async move {
        c.analytics().form_status().await
    });
    let c = client.clone();
    let fitness_summary = Resource::critical(FITNESS_SUMMARY, async move {
        c.analytics().fitness_summary().await
    });
    let c = client.clone();
    let fatigue = Resource::optional(FATIGUE_ANALYSIS, async move {
        c.analytics().fatigue_analysis().await
    });
    let c = client.clone();
    let race = Resource::optional(RACE_PREDICTION, async move {
        c.analytics().race_prediction().await
    });
    let c = client.clone();
    let zones = Resource::optional(TRAINING_ZONES, async move { c.coach().zones().await });
    let c = client.clone();
    let goal = Resource::optional(PRIMARY_GOAL, async move { c.goals().primary().await });

    Loader::new("dashboard")
        .load_all(
            scope,
            vec![form_status, fitness_summary, fatigue, race, zones, goal],
        )
        .await
}

/// Load and assemble the dashboard.
pub async fn load_dashboard(client: &StrideClient, scope: &ViewScope) -> Option<Outcome<Dashboard>> {
    dashboard(client, scope).await.map(Dashboard::from_result)
}
