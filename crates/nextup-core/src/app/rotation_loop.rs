//! Background rotation trigger.
//!
//! Sleeps until the schedule's next fire time, runs one rotation, repeats.
//! The loop reports outcomes through `tracing` and never dies on a rotation
//! fault; an unreachable store is logged and retried at the next fire.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::engine::Rotator;
use crate::ports::{Clock, Schedule};

/// Handle for the background loop.
/// - `request_shutdown()` stops the loop at the next wakeup
/// - `shutdown_and_join()` stops it and waits for the task to finish
pub struct RotationLoop {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl RotationLoop {
    /// Spawn the loop on the current tokio runtime.
    pub fn spawn(
        rotator: Arc<Rotator>,
        clock: Arc<dyn Clock>,
        schedule: Arc<dyn Schedule>,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            rotation_loop(rotator, clock, schedule, &mut shutdown_rx).await;
        });

        Self { shutdown_tx, join }
    }

    /// Request shutdown. An in-flight rotation finishes; no new one starts.
    pub fn request_shutdown(&self) {
        // ignore send error: the loop task may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for the loop task.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}

async fn rotation_loop(
    rotator: Arc<Rotator>,
    clock: Arc<dyn Clock>,
    schedule: Arc<dyn Schedule>,
    shutdown_rx: &mut watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let now = clock.now();
        let Some(next_at) = schedule.next_run_at(now) else {
            warn!("schedule has no further fire time; stopping rotation loop");
            break;
        };
        let wait = (next_at - now).to_std().unwrap_or(Duration::ZERO);

        tokio::select! {
            _ = shutdown_rx.changed() => {
                continue;
            }
            _ = tokio::time::sleep(wait) => {}
        }

        match rotator.run_rotation(clock.now()).await {
            Ok(result) => {
                info!(
                    action = %result.action,
                    success = result.success,
                    "scheduled rotation: {}",
                    result.message
                );
            }
            Err(err) => {
                warn!(error = %err, "scheduled rotation failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RotatorConfig, TagSlug};
    use crate::impls::{EventSeed, MemoryActivityLog, MemoryEventStore};
    use crate::ports::activity_log::ActivityLog;
    use crate::ports::{SystemClock, UlidIdGenerator};
    use chrono::{DateTime, Utc};

    /// Fires a few milliseconds from now, every time it is asked.
    struct EagerSchedule;

    impl Schedule for EagerSchedule {
        fn next_run_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
            Some(now + chrono::Duration::milliseconds(5))
        }
    }

    #[tokio::test]
    async fn loop_runs_rotations_until_shutdown() {
        let ids = Arc::new(UlidIdGenerator::new(SystemClock));
        let store = Arc::new(MemoryEventStore::new(ids.clone()));
        let log = Arc::new(MemoryActivityLog::new());
        let marker = TagSlug::default();

        store
            .insert_event(
                EventSeed {
                    title: "Upcoming".to_string(),
                    start: Some(Utc::now() + chrono::Duration::days(3)),
                    published: true,
                    tagged: false,
                },
                &marker,
            )
            .await;

        let rotator = Arc::new(Rotator::new(
            store.clone(),
            store.clone(),
            log.clone(),
            ids,
            RotatorConfig::default(),
        ));

        let handle = RotationLoop::spawn(rotator, Arc::new(SystemClock), Arc::new(EagerSchedule));

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.shutdown_and_join().await;

        // At least one scheduled run happened and was logged.
        assert!(!log.list().await.unwrap().is_empty());
    }
}
