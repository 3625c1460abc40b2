use crate::context::CliContext;
use crate::output;
use planview_domain::DataSource;

pub async fn handle_list(ctx: &CliContext) -> anyhow::Result<()> {
    let plans = ctx.source.list_plans().await?;
    output::output_list(plans)
}
