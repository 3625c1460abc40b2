//! Viewport windowing for fixed-size rows.
//!
//! Tracks the scroll container's offset and height and computes which rows
//! must be realized, where each one sits, and how tall the whole scrollable
//! extent is. Knows nothing about rendering; units are whatever the host uses
//! (pixels in a browser, lines in a terminal).

use crate::{PlanviewError, PlanviewResult};
use std::collections::BTreeMap;

/// Where a row should land when scrolling to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

/// The realized slice of a windowed list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowState {
    /// First realized index (inclusive).
    pub start_index: usize,
    /// One past the last realized index.
    pub end_index: usize,
    /// Absolute offset of every realized row.
    pub row_offsets: BTreeMap<usize, u64>,
    /// Full scrollable extent: `item_count * row_size`.
    pub total_extent: u64,
    /// Rows before the realized range.
    pub items_above: usize,
    /// Rows after the realized range.
    pub items_below: usize,
}

impl WindowState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// Compute the realized window for one set of inputs.
pub fn compute_window(
    item_count: usize,
    row_size: u32,
    overscan: usize,
    scroll_offset: u64,
    viewport_height: u64,
) -> WindowState {
    let row = u64::from(row_size.max(1));
    let total_extent = (item_count as u64).saturating_mul(row);
    if item_count == 0 {
        return WindowState::empty();
    }

    let first_visible = row_index(scroll_offset / row, item_count);
    let last_visible = row_index(
        scroll_offset.saturating_add(viewport_height).div_ceil(row),
        item_count,
    );

    let start_index = first_visible.saturating_sub(overscan);
    let end_index = last_visible.max(first_visible).saturating_add(overscan).min(item_count);

    let row_offsets = (start_index..end_index)
        .map(|index| (index, (index as u64).saturating_mul(row)))
        .collect();

    WindowState {
        start_index,
        end_index,
        row_offsets,
        total_extent,
        items_above: start_index,
        items_below: item_count - end_index,
    }
}

/// Row index for a row count, clamped to `item_count`.
fn row_index(rows: u64, item_count: usize) -> usize {
    usize::try_from(rows).map_or(item_count, |rows| rows.min(item_count))
}

/// Stateful window over a list whose length, viewport and scroll position change.
#[derive(Debug, Clone)]
pub struct WindowEngine {
    item_count: usize,
    row_size: u32,
    overscan: usize,
    scroll_offset: u64,
    viewport_height: u64,
    state: WindowState,
}

impl WindowEngine {
    pub fn new(row_size: u32, overscan: usize) -> Self {
        Self {
            item_count: 0,
            row_size: row_size.max(1),
            overscan,
            scroll_offset: 0,
            viewport_height: 0,
            state: WindowState::empty(),
        }
    }

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> u64 {
        self.viewport_height
    }

    pub fn total_extent(&self) -> u64 {
        (self.item_count as u64).saturating_mul(u64::from(self.row_size))
    }

    /// Largest offset a native scroll container would allow.
    pub fn max_scroll_offset(&self) -> u64 {
        self.total_extent().saturating_sub(self.viewport_height)
    }

    /// Update the item count (e.g. after filtering), clamping the scroll offset.
    pub fn set_item_count(&mut self, item_count: usize) {
        if self.item_count == item_count {
            return;
        }
        self.item_count = item_count;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self.recompute();
    }

    pub fn set_row_size(&mut self, row_size: u32) {
        let row_size = row_size.max(1);
        if self.row_size == row_size {
            return;
        }
        self.row_size = row_size;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self.recompute();
    }

    /// Record a scroll event from the host container.
    pub fn on_scroll(&mut self, scroll_offset: u64, viewport_height: u64) {
        self.viewport_height = viewport_height;
        self.scroll_offset = scroll_offset.min(self.max_scroll_offset());
        self.recompute();
    }

    pub fn resize(&mut self, viewport_height: u64) {
        if self.viewport_height == viewport_height {
            return;
        }
        self.on_scroll(self.scroll_offset, viewport_height);
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let target = if delta.is_negative() {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as u64)
        };
        self.on_scroll(target, self.viewport_height);
    }

    pub fn row_offset(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(u64::from(self.row_size))
    }

    pub fn row_offset_checked(&self, index: usize) -> PlanviewResult<u64> {
        if index >= self.item_count {
            return Err(PlanviewError::InvalidRange {
                index,
                len: self.item_count,
            });
        }
        Ok(self.row_offset(index))
    }

    /// Offset that places row `index` at `align`, clamped to the scrollable range.
    pub fn scroll_offset_for(&self, index: usize, align: Align) -> u64 {
        let row = u64::from(self.row_size);
        let top = self.row_offset(index);
        let target = match align {
            Align::Start => top,
            Align::Center => top.saturating_add(row / 2).saturating_sub(self.viewport_height / 2),
            Align::End => top.saturating_add(row).saturating_sub(self.viewport_height),
        };
        target.min(self.max_scroll_offset())
    }

    pub fn scroll_to_index(&mut self, index: usize, align: Align) {
        let offset = self.scroll_offset_for(index, align);
        self.on_scroll(offset, self.viewport_height);
    }

    /// Scroll the minimum distance needed to bring row `index` fully into view.
    pub fn ensure_visible(&mut self, index: usize) {
        if self.viewport_height == 0 || index >= self.item_count {
            return;
        }
        let top = self.row_offset(index);
        let bottom = top.saturating_add(u64::from(self.row_size));
        if top < self.scroll_offset {
            self.on_scroll(top, self.viewport_height);
        } else if bottom > self.scroll_offset.saturating_add(self.viewport_height) {
            self.on_scroll(bottom - self.viewport_height, self.viewport_height);
        }
    }

    pub fn is_row_visible(&self, index: usize) -> bool {
        let top = self.row_offset(index);
        let bottom = top.saturating_add(u64::from(self.row_size));
        index < self.item_count
            && bottom > self.scroll_offset
            && top < self.scroll_offset.saturating_add(self.viewport_height)
    }

    fn recompute(&mut self) {
        self.state = compute_window(
            self.item_count,
            self.row_size,
            self.overscan,
            self.scroll_offset,
            self.viewport_height,
        );
        tracing::trace!(
            start = self.state.start_index,
            end = self.state.end_index,
            offset = self.scroll_offset,
            "window recomputed"
        );
    }
}
