use crate::context::CliContext;
use crate::output;
use planview_domain::{DataSource, FilteredView, ObjectiveId, PlanId};

pub async fn handle_list(ctx: &CliContext, plan: PlanId, query: Option<String>) -> anyhow::Result<()> {
    let objectives = match ctx.source.list_objectives(plan).await {
        Ok(objectives) => objectives,
        Err(e) => output::output_error(&e.to_string()),
    };
    let query = query.unwrap_or_default();
    let view = FilteredView::compute(&objectives, &query);
    output::output_list(view.iter(&objectives).cloned().collect())
}

pub async fn handle_get(ctx: &CliContext, plan: PlanId, id: ObjectiveId) -> anyhow::Result<()> {
    match ctx.source.get_objective(plan, id).await {
        Ok(detail) => output::output_success(&detail),
        Err(e) => output::output_error(&e.to_string()),
    }
}

pub async fn handle_live(ctx: &CliContext, plan: PlanId) -> anyhow::Result<()> {
    match ctx.source.poll_live(plan).await {
        Ok(live) => output::output_success(serde_json::json!({ "live": live })),
        Err(e) => output::output_error(&e.to_string()),
    }
}
