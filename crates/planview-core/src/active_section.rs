//! Scroll-spy: which document section is currently being read.
//!
//! The host reports which watched anchors enter or leave a thin band near the
//! top of the scroll viewport. The most recent anchor to enter the band is
//! the active one. Visibility detection sits behind [`VisibilityObserver`]
//! so the tracker has no platform dependency; [`GeometryObserver`] is the
//! implementation for hosts that know their own layout (terminals).

use std::collections::HashSet;

/// Band of the viewport that counts as "being read", as insets from each edge.
///
/// The defaults shrink the viewport by 20% at the top and 70% at the bottom,
/// leaving a band from 20% to 30% of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityBand {
    pub top_inset: f32,
    pub bottom_inset: f32,
}

impl Default for VisibilityBand {
    fn default() -> Self {
        Self {
            top_inset: 0.20,
            bottom_inset: 0.70,
        }
    }
}

impl VisibilityBand {
    /// Absolute `[start, end)` of the band for a viewport at `offset` with `height`.
    pub fn resolve(&self, offset: u64, height: u64) -> (u64, u64) {
        let h = height as f64;
        let start = offset + (h * f64::from(self.top_inset)).round() as u64;
        let end = (offset + height).saturating_sub((h * f64::from(self.bottom_inset)).round() as u64);
        (start, end.max(start))
    }
}

/// A change in intersection state for one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityEntry {
    pub id: String,
    pub is_intersecting: bool,
}

/// Host capability that reports anchors crossing the visibility band.
pub trait VisibilityObserver {
    /// Begin watching `anchors`, replacing any previous watches.
    fn observe(&mut self, anchors: &[String], band: VisibilityBand);

    /// Release every watch.
    fn disconnect(&mut self);

    /// Drain intersection changes in the order they were observed.
    fn take_entries(&mut self) -> Vec<VisibilityEntry>;
}

/// Laid-out position of a section anchor in the scrollable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRect {
    pub id: String,
    pub top: u64,
    pub height: u64,
}

/// Observer that derives intersections from known section geometry.
#[derive(Debug, Default)]
pub struct GeometryObserver {
    layout: Vec<SectionRect>,
    watched: Vec<String>,
    band: VisibilityBand,
    viewport: (u64, u64),
    intersecting: HashSet<String>,
    queue: Vec<VisibilityEntry>,
}

impl GeometryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the laid-out section rectangles.
    pub fn set_layout(&mut self, layout: Vec<SectionRect>) {
        self.layout = layout;
        self.refresh();
    }

    /// Record the viewport's scroll offset and height.
    pub fn on_scroll(&mut self, offset: u64, height: u64) {
        self.viewport = (offset, height);
        self.refresh();
    }

    pub fn is_watching(&self) -> bool {
        !self.watched.is_empty()
    }

    fn refresh(&mut self) {
        if self.watched.is_empty() {
            return;
        }
        let (band_start, band_end) = self.band.resolve(self.viewport.0, self.viewport.1);
        for rect in &self.layout {
            if !self.watched.contains(&rect.id) {
                continue;
            }
            let inside = rect.height > 0
                && rect.top < band_end
                && rect.top + rect.height > band_start;
            let was_inside = self.intersecting.contains(&rect.id);
            if inside != was_inside {
                if inside {
                    self.intersecting.insert(rect.id.clone());
                } else {
                    self.intersecting.remove(&rect.id);
                }
                self.queue.push(VisibilityEntry {
                    id: rect.id.clone(),
                    is_intersecting: inside,
                });
            }
        }
    }
}

impl VisibilityObserver for GeometryObserver {
    fn observe(&mut self, anchors: &[String], band: VisibilityBand) {
        self.disconnect();
        self.watched = anchors.to_vec();
        self.band = band;
        self.refresh();
    }

    fn disconnect(&mut self) {
        self.watched.clear();
        self.intersecting.clear();
        self.queue.clear();
    }

    fn take_entries(&mut self) -> Vec<VisibilityEntry> {
        std::mem::take(&mut self.queue)
    }
}

/// Tracks the active section id from visibility observations.
pub struct ActiveSectionTracker<O: VisibilityObserver> {
    observer: O,
    anchors: Vec<String>,
    band: VisibilityBand,
    active: String,
    enabled: bool,
}

impl<O: VisibilityObserver> ActiveSectionTracker<O> {
    /// The tracker starts inert with the first anchor active.
    pub fn new(observer: O, anchors: Vec<String>) -> Self {
        Self::with_band(observer, anchors, VisibilityBand::default())
    }

    pub fn with_band(observer: O, anchors: Vec<String>, band: VisibilityBand) -> Self {
        let active = anchors.first().cloned().unwrap_or_default();
        Self {
            observer,
            anchors,
            band,
            active,
            enabled: false,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Start or stop observing. Nothing is watched until the content is ready.
    pub fn set_ready(&mut self, ready: bool) {
        if ready == self.enabled {
            return;
        }
        self.enabled = ready;
        if ready {
            self.observer.observe(&self.anchors, self.band);
        } else {
            self.observer.disconnect();
        }
    }

    /// Swap the anchor set, dropping every watch on the old set.
    pub fn set_anchors(&mut self, anchors: Vec<String>) {
        if anchors == self.anchors {
            return;
        }
        self.observer.disconnect();
        self.anchors = anchors;
        if !self.anchors.contains(&self.active) {
            self.active = self.anchors.first().cloned().unwrap_or_default();
        }
        if self.enabled {
            self.observer.observe(&self.anchors, self.band);
        }
    }

    /// Apply pending observations. Returns true if the active section changed.
    pub fn pump(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let before = self.active.clone();
        for entry in self.observer.take_entries() {
            if entry.is_intersecting {
                self.active = entry.id;
            }
        }
        before != self.active
    }

    /// Release all watches; used when the watched region unmounts.
    pub fn unmount(&mut self) {
        self.enabled = false;
        self.observer.disconnect();
    }
}

impl<O: VisibilityObserver> Drop for ActiveSectionTracker<O> {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
