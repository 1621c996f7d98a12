//! Training dashboard.

use anyhow::{bail, Result};
use serde_json::json;
use stride_sdk::views::{self, dashboard_resources};
use stride_sdk::{Record, ViewScope};

use super::auth::failed;
use crate::context::Context;

/// Run the dashboard command.
pub async fn run(ctx: &Context) -> Result<()> {
    ctx.navigator.navigate("/dashboard");

    let scope = ViewScope::new();
    let spinner = ctx.output.spinner("Loading dashboard...");
    let loaded = views::load_dashboard(&ctx.client, &scope).await;
    spinner.finish_and_clear();

    let Some(result) = loaded else {
        bail!("Dashboard load was abandoned");
    };
    let dashboard = result.map_err(|e| failed(e, ctx))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "form_status": dashboard.form_status,
            "fitness_summary": dashboard.fitness_summary,
            "fatigue_analysis": dashboard.fatigue_analysis,
            "race_prediction": dashboard.race_prediction,
            "training_zones": dashboard.training_zones,
            "primary_goal": dashboard.primary_goal,
            "degraded": dashboard.degraded,
        }));
        return Ok(());
    }

    section(ctx, "Form", Some(&dashboard.form_status));
    section(ctx, "Fitness", Some(&dashboard.fitness_summary));
    section(ctx, "Fatigue", dashboard.fatigue_analysis.as_ref());
    section(ctx, "Race predictions", dashboard.race_prediction.as_ref());
    section(ctx, "Training zones", dashboard.training_zones.as_ref());
    section(ctx, "Primary goal", dashboard.primary_goal.as_ref());

    if !dashboard.degraded.is_empty() {
        ctx.output.warn(&format!(
            "Some sections are unavailable: {}",
            dashboard.degraded.join(", ")
        ));
    }
    if dashboard
        .degraded
        .iter()
        .any(|name| name == dashboard_resources::TRAINING_ZONES)
    {
        ctx.output.info("Set up zones with the coach to see zone summaries.");
    }
    Ok(())
}

fn section(ctx: &Context, title: &str, record: Option<&Record>) {
    if let Some(record) = record {
        ctx.output.header(title);
        ctx.output.record(record);
    }
}
