use super::FilteredView;
use crate::Objective;
use planview_core::Debouncer;
use std::time::{Duration, Instant};

/// Outcome of a query settling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    pub query: String,
    pub matches: usize,
}

/// Search box state: raw keystrokes in, settled query and filtered view out.
#[derive(Debug, Clone)]
pub struct DebouncedFilter {
    debouncer: Debouncer<String>,
    settled: String,
    view: FilteredView,
}

impl DebouncedFilter {
    pub fn new(quiet: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(quiet),
            settled: String::new(),
            view: FilteredView::default(),
        }
    }

    /// Record the raw query after a keystroke.
    pub fn set_query(&mut self, now: Instant, text: impl Into<String>) {
        self.debouncer.input(now, text.into());
    }

    /// Settle the query if the quiet period has elapsed, recomputing the view.
    ///
    /// Returns `None` while input is still pending or when the settled text
    /// did not change.
    pub fn poll(&mut self, now: Instant, objectives: &[Objective]) -> Option<FilterChange> {
        let query = self.debouncer.poll(now)?;
        if query == self.settled {
            return None;
        }
        self.view = FilteredView::compute(objectives, &query);
        tracing::debug!(query = %query, matches = self.view.len(), "query settled");
        self.settled = query.clone();
        Some(FilterChange {
            query,
            matches: self.view.len(),
        })
    }

    /// Recompute the view after the source collection changed.
    pub fn refresh(&mut self, objectives: &[Objective]) {
        self.view = FilteredView::compute(objectives, &self.settled);
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn settled_query(&self) -> &str {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Drop pending input without settling it.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    /// Forget the settled query and any pending input.
    pub fn reset(&mut self, objectives: &[Objective]) {
        self.debouncer.cancel();
        self.settled.clear();
        self.refresh(objectives);
    }
}
