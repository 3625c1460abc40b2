use crate::schedule::ScheduledTask;
use std::time::{Duration, Instant};

/// Settles a rapidly changing value after a quiet period.
///
/// Every new input restarts the quiet period and discards the previous
/// pending value, so a settlement always carries the latest input.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: ScheduledTask<T>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: ScheduledTask::new(),
        }
    }

    pub fn input(&mut self, now: Instant, value: T) {
        self.pending.schedule(now, self.quiet, value);
    }

    /// Returns the settled value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        self.pending.poll(now)
    }

    pub fn cancel(&mut self) {
        self.pending.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }
}
