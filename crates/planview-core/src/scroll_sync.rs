//! One-shot scroll restoration for the first selection after mount.
//!
//! A list that is opened with an item already selected (deep link, landing
//! redirect) should bring that item into view once. Selections made while the
//! user is navigating must leave the scroll position alone. The distinction is
//! tracked per view instance:
//!
//! ```text
//! Fresh ──selection──▶ Anchored ──different selection──▶ Settled
//!   │                     │
//!   └─(list empty)─▶ Waiting ─(list loads)─▶ Anchored
//! ```
//!
//! Only entering `Anchored` schedules a scroll, and the scroll is applied at
//! most once per anchor.

use crate::schedule::ScheduledTask;
use crate::window::Align;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// A one-time instruction to align the viewport to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollAnchor {
    pub target_index: usize,
    pub align: Align,
    pub consumed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing selected since mount.
    Fresh,
    /// A selection arrived before the list had any rows.
    Waiting,
    /// The first selection resolved to a row; scroll pending or applied.
    Anchored,
    /// The user moved between selections; auto-scroll is disarmed.
    Settled,
}

#[derive(Debug, Clone)]
enum Phase<Id> {
    Fresh,
    Waiting(Id),
    Anchored { id: Id, anchor: ScrollAnchor },
    Settled(Id),
}

#[derive(Debug, Clone)]
pub struct ScrollSync<Id> {
    phase: Phase<Id>,
    settle: Duration,
    near_end_threshold: usize,
    timer: ScheduledTask<()>,
    applied: usize,
}

impl<Id: Clone + PartialEq + Debug> ScrollSync<Id> {
    pub fn new(settle: Duration, near_end_threshold: usize) -> Self {
        Self {
            phase: Phase::Fresh,
            settle,
            near_end_threshold,
            timer: ScheduledTask::new(),
            applied: 0,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        match self.phase {
            Phase::Fresh => SyncPhase::Fresh,
            Phase::Waiting(_) => SyncPhase::Waiting,
            Phase::Anchored { .. } => SyncPhase::Anchored,
            Phase::Settled(_) => SyncPhase::Settled,
        }
    }

    pub fn anchor(&self) -> Option<&ScrollAnchor> {
        match &self.phase {
            Phase::Anchored { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    /// The most recently observed selection.
    pub fn selected(&self) -> Option<&Id> {
        match &self.phase {
            Phase::Fresh => None,
            Phase::Waiting(id) | Phase::Anchored { id, .. } | Phase::Settled(id) => Some(id),
        }
    }

    /// Whether a scroll is scheduled but not yet applied.
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Number of scrolls applied since this instance was created.
    pub fn applications(&self) -> usize {
        self.applied
    }

    /// Observe the current selection.
    ///
    /// `len` is the length of the list the selection is resolved against and
    /// `locate` maps an id to its row in that list.
    pub fn observe_selection<F>(&mut self, now: Instant, id: Id, len: usize, locate: F)
    where
        F: Fn(&Id) -> Option<usize>,
    {
        match &self.phase {
            Phase::Fresh | Phase::Waiting(_) => {
                if len == 0 {
                    self.phase = Phase::Waiting(id);
                } else {
                    self.arm(now, id, len, &locate);
                }
            }
            Phase::Anchored { id: current, .. } => {
                if *current != id {
                    if self.timer.cancel().is_some() {
                        tracing::debug!(?id, "navigation before settle delay, dropping scroll");
                    }
                    self.phase = Phase::Settled(id);
                }
            }
            Phase::Settled(_) => {
                self.phase = Phase::Settled(id);
            }
        }
    }

    /// The list the selection resolves against has changed (loaded, filtered).
    ///
    /// A pending anchor is rebuilt against the new rows, since indices from the
    /// previous list are meaningless in the new one.
    pub fn on_view_changed<F>(&mut self, now: Instant, len: usize, locate: F)
    where
        F: Fn(&Id) -> Option<usize>,
    {
        match &self.phase {
            Phase::Waiting(id) if len > 0 => {
                let id = id.clone();
                self.arm(now, id, len, &locate);
            }
            Phase::Anchored { id, anchor } if !anchor.consumed => {
                let id = id.clone();
                self.timer.cancel();
                self.arm(now, id, len, &locate);
            }
            _ => {}
        }
    }

    /// Apply the pending anchor once the settle delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<ScrollAnchor> {
        self.timer.poll(now)?;
        match &mut self.phase {
            Phase::Anchored { anchor, .. } if !anchor.consumed => {
                anchor.consumed = true;
                self.applied += 1;
                Some(anchor.clone())
            }
            _ => None,
        }
    }

    /// Cancel any pending scroll; used when the view is torn down.
    pub fn teardown(&mut self) {
        if self.timer.cancel().is_some() {
            tracing::debug!("view torn down with scroll pending");
        }
    }

    /// Return to `Fresh` for a newly mounted collection.
    pub fn reset(&mut self) {
        self.teardown();
        self.phase = Phase::Fresh;
    }

    fn arm<F>(&mut self, now: Instant, id: Id, len: usize, locate: &F)
    where
        F: Fn(&Id) -> Option<usize>,
    {
        match locate(&id) {
            Some(index) => {
                let near_end = index + self.near_end_threshold >= len;
                let anchor = ScrollAnchor {
                    target_index: index,
                    align: if near_end { Align::End } else { Align::Center },
                    consumed: false,
                };
                tracing::debug!(?id, index, align = ?anchor.align, "anchoring first selection");
                self.timer.schedule(now, self.settle, ());
                self.phase = Phase::Anchored { id, anchor };
            }
            None => {
                tracing::debug!(?id, "first selection not in current view, skipping scroll");
                self.phase = Phase::Settled(id);
            }
        }
    }
}
