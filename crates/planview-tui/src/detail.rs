//! View model for the objective detail pane.
//!
//! The pane is one scrollable document of three sections: task, result and
//! the paginated execution log. Sections are laid out as plain lines so their
//! geometry is known exactly, which is what the active-section tracker
//! observes.

use crate::markdown_renderer::render_markdown;
use crate::theme;
use planview_core::{
    ActiveSectionTracker, FetchTicket, GeometryObserver, NavigatorConfig, Page, PageCursor,
    PlanviewError, PlanviewResult, SectionRect,
};
use planview_domain::{LiveObjective, ObjectiveContent, ObjectiveDetail, Selection, SubObjective};
use ratatui::text::{Line, Span};

pub const SECTION_IDS: [&str; 3] = ["task", "result", "log"];
const SECTION_LABELS: [&str; 3] = ["Task", "Result", "Execution"];
const SECTION_TITLES: [&str; 3] = ["Task Requirement", "Final Result", "Execution Log"];

/// Rows kept above a section heading when jumping to it.
const SECTION_MARGIN: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailContent {
    pub title: String,
    /// `None` for the live objective.
    pub counter: Option<u32>,
    pub content: ObjectiveContent,
}

impl From<ObjectiveDetail> for DetailContent {
    fn from(detail: ObjectiveDetail) -> Self {
        Self {
            title: detail.objective.title,
            counter: Some(detail.objective.counter),
            content: detail.content,
        }
    }
}

impl From<LiveObjective> for DetailContent {
    fn from(live: LiveObjective) -> Self {
        Self {
            title: live.title,
            counter: None,
            content: live.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Empty,
    Loading,
    Ready(DetailContent),
    Unavailable(String),
}

/// What the execution log table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRows<'a> {
    Syncing,
    Unavailable(&'a str),
    NoSteps,
    Rows(&'a [SubObjective]),
}

pub struct ObjectiveDetailView {
    selection: Option<Selection>,
    state: DetailState,
    task_lines: Vec<Line<'static>>,
    result_lines: Vec<Line<'static>>,
    pages: PageCursor<Selection, SubObjective>,
    page_error: Option<String>,
    sections: ActiveSectionTracker<GeometryObserver>,
    layout: Vec<SectionRect>,
    scroll_offset: u64,
    viewport_height: u64,
}

impl ObjectiveDetailView {
    pub fn new(config: &NavigatorConfig) -> Self {
        let anchors = SECTION_IDS.iter().map(|id| id.to_string()).collect();
        Self {
            selection: None,
            state: DetailState::Empty,
            task_lines: Vec::new(),
            result_lines: Vec::new(),
            pages: PageCursor::new(Selection::Live, config.page_size),
            page_error: None,
            sections: ActiveSectionTracker::new(GeometryObserver::new(), anchors),
            layout: Vec::new(),
            scroll_offset: 0,
            viewport_height: 0,
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn content_height(&self) -> u64 {
        self.layout.last().map_or(0, |rect| rect.top + rect.height)
    }

    pub fn layout(&self) -> &[SectionRect] {
        &self.layout
    }

    pub fn active_section(&self) -> &str {
        self.sections.active()
    }

    /// Sidebar entries: `(id, label, active)`.
    pub fn nav_entries(&self) -> Vec<(&'static str, &'static str, bool)> {
        SECTION_IDS
            .iter()
            .zip(SECTION_LABELS)
            .map(|(id, label)| (*id, label, self.sections.active() == *id))
            .collect()
    }

    /// Switch the pane to `selection`.
    ///
    /// Returns the first log page fetch for an objective. The previous
    /// objective's pages, pending fetches and section watches are dropped.
    pub fn show(&mut self, selection: Selection) -> Option<FetchTicket<Selection>> {
        if self.selection == Some(selection) {
            return None;
        }
        tracing::debug!(%selection, "showing detail");
        self.selection = Some(selection);
        self.state = DetailState::Loading;
        self.task_lines.clear();
        self.result_lines.clear();
        self.page_error = None;
        self.scroll_offset = 0;
        self.sections.set_ready(false);
        self.pages.switch_key(selection);
        self.relayout();
        match selection {
            Selection::Objective(_) => self.pages.request_page(0),
            Selection::Live => None,
        }
    }

    /// Back to the empty pane. Outstanding detail and page results are
    /// discarded when they arrive.
    pub fn clear(&mut self) {
        self.selection = None;
        self.state = DetailState::Empty;
        self.task_lines.clear();
        self.result_lines.clear();
        self.page_error = None;
        self.scroll_offset = 0;
        self.sections.set_ready(false);
        self.pages.reset();
        self.relayout();
    }

    /// Apply a detail fetch. Results for anything but the current selection
    /// are ignored.
    pub fn apply_detail(
        &mut self,
        selection: Selection,
        result: PlanviewResult<DetailContent>,
    ) -> bool {
        if self.selection != Some(selection) {
            tracing::debug!(%selection, "discarding detail for previous selection");
            return false;
        }
        match result {
            Ok(content) => {
                self.task_lines = section_body(content.content.task.as_deref());
                self.result_lines = section_body(content.content.result.as_deref());
                self.state = DetailState::Ready(content);
                self.relayout();
                self.sections.set_ready(true);
                self.sync_sections();
            }
            Err(e) => {
                tracing::warn!(%selection, "objective unavailable: {}", e);
                self.state = DetailState::Unavailable(e.to_string());
                self.sections.set_ready(false);
                self.relayout();
            }
        }
        true
    }

    /// A live poll answered while the live objective is shown.
    pub fn apply_live(&mut self, live: Option<LiveObjective>) {
        if self.selection != Some(Selection::Live) {
            return;
        }
        let result = match live {
            Some(live) => Ok(DetailContent::from(live)),
            None => Err(PlanviewError::NotFound(
                "No objective is live right now".to_string(),
            )),
        };
        if let (DetailState::Ready(current), Ok(next)) = (&self.state, &result) {
            if current == next {
                return;
            }
        }
        self.apply_detail(Selection::Live, result);
    }

    pub fn requested_page(&self) -> usize {
        self.pages.requested_page()
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.pages.total_pages()
    }

    pub fn request_page(&mut self, page_index: usize) -> Option<FetchTicket<Selection>> {
        if !matches!(self.selection, Some(Selection::Objective(_))) {
            return None;
        }
        let ticket = self.pages.request_page(page_index);
        self.relayout();
        ticket
    }

    pub fn next_page(&mut self) -> Option<FetchTicket<Selection>> {
        let pages = self.pages.total_pages()?;
        let next = (self.pages.requested_page() + 1).min(pages.saturating_sub(1));
        self.request_page(next)
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket<Selection>> {
        self.pages.total_pages()?;
        let prev = self.pages.requested_page().saturating_sub(1);
        self.request_page(prev)
    }

    /// Hand back a log page fetch; returns the next fetch in the chain, if any.
    pub fn complete_page(
        &mut self,
        ticket: &FetchTicket<Selection>,
        result: PlanviewResult<Page<SubObjective>>,
    ) -> Option<FetchTicket<Selection>> {
        match self.pages.complete(ticket, result) {
            Ok(true) => self.page_error = None,
            Ok(false) => return None,
            Err(e) => self.page_error = Some(e.to_string()),
        }
        self.relayout();
        self.sync_sections();
        self.pages.next_fetch()
    }

    pub fn log_rows(&self) -> LogRows<'_> {
        if let Some(message) = self.page_error.as_deref() {
            return LogRows::Unavailable(message);
        }
        if self.selection == Some(Selection::Live) {
            return LogRows::NoSteps;
        }
        match self.pages.current_page() {
            Some(page) if page.items.is_empty() => LogRows::NoSteps,
            Some(page) => LogRows::Rows(&page.items),
            None if self.pages.total_pages() == Some(0) => LogRows::NoSteps,
            None => LogRows::Syncing,
        }
    }

    /// `Page x of y`, shown only when there is more than one page.
    pub fn page_label(&self) -> Option<String> {
        match self.pages.total_pages() {
            Some(pages) if pages > 1 => {
                Some(format!("Page {} of {}", self.pages.requested_page() + 1, pages))
            }
            _ => None,
        }
    }

    pub fn on_scroll(&mut self, offset: u64, viewport_height: u64) {
        self.viewport_height = viewport_height;
        self.scroll_offset = offset.min(self.max_scroll_offset());
        self.sync_sections();
    }

    pub fn resize(&mut self, viewport_height: u64) {
        if viewport_height != self.viewport_height {
            self.on_scroll(self.scroll_offset, viewport_height);
        }
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let target = if delta.is_negative() {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as u64)
        };
        self.on_scroll(target, self.viewport_height);
    }

    /// Jump so the section heading sits just below the top edge.
    pub fn scroll_to_section(&mut self, id: &str) -> bool {
        let Some(rect) = self.layout.iter().find(|rect| rect.id == id) else {
            return false;
        };
        let target = rect.top.saturating_sub(SECTION_MARGIN);
        self.on_scroll(target, self.viewport_height);
        true
    }

    /// Pull pending section observations. Returns true if the active section changed.
    pub fn pump_sections(&mut self) -> bool {
        self.sections.pump()
    }

    /// The whole document, in layout order.
    pub fn document(&self) -> Vec<Line<'static>> {
        SECTION_IDS
            .iter()
            .flat_map(|id| self.section_lines(id))
            .collect()
    }

    /// Cancel section watches; the pane is going away.
    pub fn teardown(&mut self) {
        self.sections.unmount();
    }

    fn max_scroll_offset(&self) -> u64 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    fn relayout(&mut self) {
        let mut top = 0;
        self.layout = SECTION_IDS
            .iter()
            .map(|id| {
                let height = self.section_lines(id).len() as u64;
                let rect = SectionRect {
                    id: id.to_string(),
                    top,
                    height,
                };
                top += height;
                rect
            })
            .collect();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self.sections.observer_mut().set_layout(self.layout.clone());
    }

    fn sync_sections(&mut self) {
        self.sections
            .observer_mut()
            .on_scroll(self.scroll_offset, self.viewport_height);
        self.sections.pump();
    }

    fn section_lines(&self, id: &str) -> Vec<Line<'static>> {
        let (title, body) = match id {
            "task" => (SECTION_TITLES[0], self.task_lines.clone()),
            "result" => (SECTION_TITLES[1], self.result_lines.clone()),
            _ => (SECTION_TITLES[2], self.log_lines()),
        };
        let mut lines = Vec::with_capacity(body.len() + 3);
        lines.push(Line::from(Span::styled(title, theme::section_title())));
        lines.push(Line::default());
        lines.extend(body);
        lines.push(Line::default());
        lines
    }

    fn log_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            format!("{:<12} {:<52} {}", "STEP", "INSTRUCTION", "RESPONSE"),
            theme::label_text(),
        ))];
        match self.log_rows() {
            LogRows::Syncing => {
                lines.push(Line::from(Span::styled("Syncing steps...", theme::muted_italic())));
            }
            LogRows::Unavailable(message) => {
                lines.push(Line::from(Span::styled(
                    format!("Steps unavailable: {}", message),
                    theme::error_text(),
                )));
            }
            LogRows::NoSteps => {
                lines.push(Line::from(Span::styled("No steps recorded.", theme::muted_italic())));
            }
            LogRows::Rows(items) => {
                lines.extend(items.iter().map(|step| {
                    Line::from(vec![
                        Span::styled(format!("{:<12} ", format!("#{}", step.id)), theme::label_text()),
                        Span::raw(format!("{:<52} ", step.input)),
                        Span::styled(step.output.clone(), theme::muted_italic()),
                    ])
                }));
            }
        }
        if let Some(label) = self.page_label() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("{}   [ previous   ] next", label),
                theme::label_text(),
            )));
        }
        lines
    }
}

fn section_body(markdown: Option<&str>) -> Vec<Line<'static>> {
    match markdown {
        Some(text) if !text.trim().is_empty() => render_markdown(text),
        _ => vec![Line::from(Span::styled(
            "No data available yet.",
            theme::muted_italic(),
        ))],
    }
}
