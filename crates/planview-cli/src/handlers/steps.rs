use crate::context::CliContext;
use crate::output;
use planview_core::{PageCursor, PlanviewError};
use planview_domain::{ObjectiveId, SubObjective, SubObjectivePages};
use serde::Serialize;

#[derive(Serialize)]
struct StepsPage<'a> {
    objective: ObjectiveId,
    page: usize,
    page_size: usize,
    total: usize,
    total_pages: usize,
    pages_loaded: usize,
    items: &'a [SubObjective],
}

/// Loads every page up to `page` in order, the way the detail pane does.
pub async fn handle(
    ctx: &CliContext,
    objective: ObjectiveId,
    page: usize,
    page_size: Option<usize>,
) -> anyhow::Result<()> {
    let page_size = page_size.unwrap_or(ctx.config.page_size);
    if page_size == 0 {
        output::output_error("page size must be positive");
    }
    let pages = SubObjectivePages::new(ctx.source.clone());
    let mut cursor: PageCursor<ObjectiveId, SubObjective> = PageCursor::new(objective, page_size);

    match cursor.ensure_page(page, &pages).await {
        Ok(()) => {}
        Err(PlanviewError::InvalidRange { index, len }) => {
            output::output_error(&format!("Page {} is out of range ({} pages)", index, len))
        }
        Err(e) => output::output_error(&e.to_string()),
    }

    let items = match cursor.page(page)? {
        Some(loaded) => loaded.items.as_slice(),
        None => &[],
    };
    output::output_success(StepsPage {
        objective,
        page,
        page_size,
        total: cursor.total().unwrap_or_default(),
        total_pages: cursor.total_pages().unwrap_or_default(),
        pages_loaded: cursor.loaded_pages().len(),
        items,
    })
}
