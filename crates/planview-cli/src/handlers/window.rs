use crate::context::CliContext;
use crate::output;
use planview_core::window::compute_window;
use serde::Serialize;

#[derive(Serialize)]
struct WindowReport {
    start_index: usize,
    end_index: usize,
    realized: usize,
    items_above: usize,
    items_below: usize,
    total_extent: u64,
    first_offset: Option<u64>,
}

pub fn handle(
    ctx: &CliContext,
    count: usize,
    offset: u64,
    height: u64,
    row_size: Option<u32>,
    overscan: Option<usize>,
) -> anyhow::Result<()> {
    let row_size = row_size.unwrap_or(ctx.config.row_size);
    if row_size == 0 {
        output::output_error("row size must be positive");
    }
    let overscan = overscan.unwrap_or(ctx.config.overscan);
    let state = compute_window(count, row_size, overscan, offset, height);
    output::output_success(WindowReport {
        start_index: state.start_index,
        end_index: state.end_index,
        realized: state.len(),
        items_above: state.items_above,
        items_below: state.items_below,
        total_extent: state.total_extent,
        first_offset: state.row_offsets.get(&state.start_index).copied(),
    })
}
