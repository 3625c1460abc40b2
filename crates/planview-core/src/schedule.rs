//! Cancellable one-shot tasks driven by an explicit clock.
//!
//! Nothing here spawns a timer. The owner passes `now` into [`ScheduledTask::poll`]
//! from its own tick, so dropping or cancelling the owner always cancels the task.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ScheduledTask<T> {
    due: Option<(Instant, T)>,
}

impl<T> ScheduledTask<T> {
    pub fn new() -> Self {
        Self { due: None }
    }

    /// Schedule `payload` to fire `delay` after `now`, replacing any pending payload.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) {
        self.due = Some((now + delay, payload));
    }

    /// Drop the pending payload, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.due.take().map(|(_, payload)| payload)
    }

    /// Fire the payload if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.due {
            Some((deadline, _)) if now >= *deadline => self.cancel(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }
}

impl<T> Default for ScheduledTask<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut task = ScheduledTask::new();
        task.schedule(t0, Duration::from_millis(100), "scroll");

        assert_eq!(task.poll(t0 + Duration::from_millis(99)), None);
        assert_eq!(task.poll(t0 + Duration::from_millis(100)), Some("scroll"));
        assert_eq!(task.poll(t0 + Duration::from_millis(500)), None);
        assert!(!task.is_pending());
    }

    #[test]
    fn test_reschedule_replaces_payload_and_deadline() {
        let t0 = Instant::now();
        let mut task = ScheduledTask::new();
        task.schedule(t0, Duration::from_millis(100), 1);
        task.schedule(t0 + Duration::from_millis(50), Duration::from_millis(100), 2);

        assert_eq!(task.poll(t0 + Duration::from_millis(120)), None);
        assert_eq!(task.poll(t0 + Duration::from_millis(150)), Some(2));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let t0 = Instant::now();
        let mut task = ScheduledTask::new();
        task.schedule(t0, Duration::ZERO, ());
        assert_eq!(task.cancel(), Some(()));
        assert_eq!(task.poll(t0 + Duration::from_secs(1)), None);
    }
}
