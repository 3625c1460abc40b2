//! View model for the objective list.
//!
//! Owns one instance of each engine piece for the list: the debounced filter,
//! the window over the filtered rows, and the scroll synchronizer. All state
//! changes take the current instant explicitly, so the model is driven by the
//! app's tick and can be tested without a terminal or a clock.

use chrono::{DateTime, Utc};
use planview_core::{InputBuffer, NavigatorConfig, ScrollSync, SyncPhase, WindowEngine};
use planview_domain::{
    DebouncedFilter, FilteredView, LiveObjective, Objective, ObjectiveId, PlanId, Selection,
};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Unavailable(String),
}

/// The most recent live poll result and when it was observed.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSnapshot {
    pub objective: LiveObjective,
    pub polled_at: DateTime<Utc>,
}

/// One realized list row.
#[derive(Debug, Clone, Copy)]
pub struct NavigatorRow<'a> {
    /// Position in the filtered view.
    pub index: usize,
    /// Absolute offset of the row within the list's scroll extent.
    pub offset: u64,
    pub objective: &'a Objective,
    pub selected: bool,
    pub highlighted: bool,
}

pub struct ObjectiveNavigator {
    plan_id: PlanId,
    objectives: Vec<Objective>,
    load: LoadState,
    input: InputBuffer,
    filter: DebouncedFilter,
    window: WindowEngine,
    sync: ScrollSync<ObjectiveId>,
    selection: Option<Selection>,
    cursor: usize,
    live: Option<LiveSnapshot>,
    live_known: bool,
}

impl ObjectiveNavigator {
    pub fn new(plan_id: PlanId, config: &NavigatorConfig) -> Self {
        Self {
            plan_id,
            objectives: Vec::new(),
            load: LoadState::Loading,
            input: InputBuffer::new(),
            filter: DebouncedFilter::new(config.debounce()),
            window: WindowEngine::new(config.row_size, config.overscan),
            sync: ScrollSync::new(config.scroll_settle(), config.near_end_threshold),
            selection: None,
            cursor: 0,
            live: None,
            live_known: false,
        }
    }

    pub fn plan_id(&self) -> PlanId {
        self.plan_id
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn view(&self) -> &FilteredView {
        self.filter.view()
    }

    pub fn window(&self) -> &WindowEngine {
        &self.window
    }

    pub fn scroll_sync(&self) -> &ScrollSync<ObjectiveId> {
        &self.sync
    }

    pub fn sync_phase(&self) -> SyncPhase {
        self.sync.phase()
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn query(&self) -> &str {
        self.input.as_str()
    }

    pub fn settled_query(&self) -> &str {
        self.filter.settled_query()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn live(&self) -> Option<&LiveSnapshot> {
        self.live.as_ref()
    }

    /// Whether at least one live poll has answered.
    pub fn live_known(&self) -> bool {
        self.live_known
    }

    /// The objective list finished loading.
    pub fn set_objectives(&mut self, now: Instant, objectives: Vec<Objective>) {
        tracing::info!(plan = self.plan_id, count = objectives.len(), "objectives loaded");
        self.objectives = objectives;
        self.load = LoadState::Ready;
        self.filter.refresh(&self.objectives);
        self.view_changed(now);
    }

    pub fn set_unavailable(&mut self, message: impl Into<String>) {
        self.load = LoadState::Unavailable(message.into());
    }

    pub fn set_live(&mut self, live: Option<LiveObjective>, polled_at: DateTime<Utc>) {
        self.live_known = true;
        self.live = live.map(|objective| LiveSnapshot {
            objective,
            polled_at,
        });
    }

    /// A live poll failed; keep showing the last known state.
    pub fn mark_live_polled(&mut self) {
        self.live_known = true;
    }

    /// Replace the raw query text, as if typed.
    pub fn set_query(&mut self, now: Instant, text: impl Into<String>) {
        self.input.set(text);
        self.filter.set_query(now, self.input.as_str());
    }

    pub fn type_char(&mut self, now: Instant, c: char) {
        self.input.insert(c);
        self.filter.set_query(now, self.input.as_str());
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.input.backspace() {
            self.filter.set_query(now, self.input.as_str());
        }
    }

    pub fn delete_word(&mut self, now: Instant) {
        if self.input.delete_word() {
            self.filter.set_query(now, self.input.as_str());
        }
    }

    pub fn clear_query(&mut self, now: Instant) {
        if !self.input.is_empty() {
            self.input.clear();
            self.filter.set_query(now, "");
        }
    }

    pub fn move_input_cursor_left(&mut self) {
        self.input.move_left();
    }

    pub fn move_input_cursor_right(&mut self) {
        self.input.move_right();
    }

    /// Native scroll event from the list container.
    pub fn on_scroll(&mut self, offset: u64, viewport_height: u64) {
        self.window.on_scroll(offset, viewport_height);
    }

    pub fn resize(&mut self, viewport_height: u64) {
        self.window.resize(viewport_height);
    }

    pub fn scroll_by(&mut self, delta: i64) {
        self.window.scroll_by(delta);
    }

    /// Make `selection` current. Only the first objective selection since the
    /// list was mounted arms an automatic scroll.
    pub fn select_item(&mut self, now: Instant, selection: Selection) -> bool {
        if self.selection == Some(selection) {
            return false;
        }
        self.selection = Some(selection);
        if let Selection::Objective(id) = selection {
            let view = self.filter.view();
            let objectives = &self.objectives;
            if let Some(position) = view.position_of(objectives, id) {
                self.cursor = position;
            }
            self.sync
                .observe_selection(now, id, view.len(), |id| view.position_of(objectives, *id));
        }
        true
    }

    /// Where the list lands when nothing was selected explicitly: the live
    /// objective if one exists, else the most recent objective.
    pub fn landing_selection(&self) -> Option<Selection> {
        if self.live.is_some() {
            return Some(Selection::Live);
        }
        self.objectives
            .first()
            .map(|objective| Selection::Objective(objective.id))
    }

    /// Advance timers. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut dirty = false;
        if let Some(change) = self.filter.poll(now, &self.objectives) {
            tracing::debug!(query = %change.query, matches = change.matches, "rebasing scroll anchor");
            self.view_changed(now);
            dirty = true;
        }
        if let Some(anchor) = self.sync.poll(now) {
            self.window.scroll_to_index(anchor.target_index, anchor.align);
            dirty = true;
        }
        dirty
    }

    pub fn move_cursor(&mut self, delta: i64) {
        let len = self.filter.view().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let target = if delta.is_negative() {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.cursor.saturating_add(delta as usize)
        };
        self.cursor = target.min(len - 1);
        self.window.ensure_visible(self.cursor);
    }

    pub fn cursor_home(&mut self) {
        self.move_cursor(i64::MIN);
    }

    pub fn cursor_end(&mut self) {
        self.move_cursor(i64::MAX);
    }

    pub fn page_size(&self) -> i64 {
        let rows = self.window.viewport_height() / u64::from(self.window.row_size());
        rows.max(1) as i64
    }

    /// Objective under the keyboard cursor.
    pub fn highlighted(&self) -> Option<&Objective> {
        self.filter.view().get(&self.objectives, self.cursor)
    }

    /// Rows the window engine says must be realized.
    pub fn rows(&self) -> Vec<NavigatorRow<'_>> {
        let state = self.window.state();
        let view = self.filter.view();
        let selected = self.selection.and_then(|s| s.objective_id());
        state
            .indices()
            .filter_map(|index| {
                let objective = view.get(&self.objectives, index)?;
                Some(NavigatorRow {
                    index,
                    offset: state.row_offsets.get(&index).copied().unwrap_or_default(),
                    objective,
                    selected: selected == Some(objective.id),
                    highlighted: index == self.cursor,
                })
            })
            .collect()
    }

    /// `N objective(s)`, with ` found` while a query is settled.
    pub fn footer_text(&self) -> String {
        let count = self.filter.view().len();
        let mut text = format!("{} objective{}", count, if count == 1 { "" } else { "s" });
        if !self.filter.settled_query().is_empty() {
            text.push_str(" found");
        }
        text
    }

    /// Loaded, but the settled query retains nothing.
    pub fn shows_no_results(&self) -> bool {
        self.load == LoadState::Ready && self.filter.view().is_empty()
    }

    /// Remount the list for another plan.
    ///
    /// Pending query input and a pending first-selection scroll are cancelled,
    /// never applied to the new plan's rows. The synchronizer starts fresh, so
    /// the next selection scrolls once again.
    pub fn reset(&mut self, plan_id: PlanId) {
        tracing::info!(from = self.plan_id, to = plan_id, "switching plan");
        self.plan_id = plan_id;
        self.objectives.clear();
        self.load = LoadState::Loading;
        self.input.clear();
        self.filter.reset(&self.objectives);
        self.sync.reset();
        self.window.set_item_count(0);
        self.window.on_scroll(0, self.window.viewport_height());
        self.selection = None;
        self.cursor = 0;
        self.live = None;
        self.live_known = false;
    }

    /// Cancel everything scheduled; the list is going away.
    pub fn teardown(&mut self) {
        self.filter.cancel();
        self.sync.teardown();
    }

    fn view_changed(&mut self, now: Instant) {
        let view = self.filter.view();
        let objectives = &self.objectives;
        self.window.set_item_count(view.len());
        self.cursor = match self.selection.and_then(|s| s.objective_id()) {
            Some(id) => view.position_of(objectives, id).unwrap_or(0),
            None => 0,
        }
        .min(view.len().saturating_sub(1));
        self.sync
            .on_view_changed(now, view.len(), |id| view.position_of(objectives, *id));
    }
}
