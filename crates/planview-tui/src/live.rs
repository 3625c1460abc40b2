use chrono::{DateTime, Utc};
use planview_core::PlanviewResult;
use planview_domain::{DataSource, LiveObjective, PlanId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Outcome of one live poll.
#[derive(Debug)]
pub struct LiveUpdate {
    pub plan_id: PlanId,
    pub polled_at: DateTime<Utc>,
    pub result: PlanviewResult<Option<LiveObjective>>,
}

/// Polls the live objective on a fixed interval until stopped or dropped.
pub struct LivePoller {
    handle: Option<JoinHandle<()>>,
}

impl LivePoller {
    /// Spawn the poll loop. The first poll happens immediately.
    pub fn start<T>(
        source: Arc<dyn DataSource>,
        plan_id: PlanId,
        interval: Duration,
        tx: mpsc::UnboundedSender<T>,
    ) -> Self
    where
        T: From<LiveUpdate> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let result = source.poll_live(plan_id).await;
                if let Err(e) = &result {
                    tracing::warn!(plan = plan_id, "live poll failed: {}", e);
                }
                let update = LiveUpdate {
                    plan_id,
                    polled_at: Utc::now(),
                    result,
                };
                if tx.send(T::from(update)).is_err() {
                    break;
                }
            }
        });
        tracing::info!(plan = plan_id, every = ?interval, "started live polling");
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::info!("stopped live polling");
        }
    }
}

impl Drop for LivePoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planview_domain::InMemorySource;

    #[tokio::test]
    async fn test_first_poll_is_immediate() {
        let source: Arc<dyn DataSource> = Arc::new(InMemorySource::new());
        let (tx, mut rx) = mpsc::unbounded_channel::<LiveUpdate>();
        let _poller = LivePoller::start(source, 1, Duration::from_secs(60), tx);

        let update = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(update.plan_id, 1);
        assert!(update.result.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stop_ends_polling() {
        let source: Arc<dyn DataSource> = Arc::new(InMemorySource::new());
        let (tx, mut rx) = mpsc::unbounded_channel::<LiveUpdate>();
        let mut poller = LivePoller::start(source, 1, Duration::from_millis(5), tx);
        rx.recv().await.unwrap();

        poller.stop();
        assert!(!poller.is_running());
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
    }
}
