//! Timer driving a synchronizer's polls.
//!
//! The poll task is owned by a [`SyncHandle`]. Shutting the handle down (or
//! dropping it) stops the timer and closes the synchronizer, so a poll that
//! is still waiting on the backend discards its result.

use crate::source::ItemSource;
use crate::synchronizer::{PollOutcome, PollingListSynchronizer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Owns a running poll task.
pub struct SyncHandle<S: ItemSource + 'static> {
    sync: Arc<PollingListSynchronizer<S>>,
    running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
    updates: Option<mpsc::Receiver<PollOutcome>>,
}

/// Starts polling `sync` every `poll_interval`. The first poll happens one
/// interval after the call, not immediately.
pub fn spawn_poller<S: ItemSource + 'static>(sync: Arc<PollingListSynchronizer<S>>) -> SyncHandle<S> {
    let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
    let running = Arc::new(AtomicBool::new(true));
    let period = sync.config().poll_interval;

    info!(list = %sync.name(), interval_secs = period.as_secs(), "Starting poller");

    let task = tokio::spawn({
        let sync = Arc::clone(&sync);
        let running = Arc::clone(&running);
        async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            while running.load(Ordering::SeqCst) {
                ticker.tick().await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }

                let outcome = sync.poll().await;
                match &outcome {
                    PollOutcome::Closed => break,
                    PollOutcome::Merged { added, .. } if *added > 0 => {}
                    _ => continue,
                }

                match tx.try_send(outcome) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        warn!(list = %sync.name(), "Update channel full, dropping update");
                    }
                    Err(TrySendError::Closed(_)) => {
                        debug!(list = %sync.name(), "No update listener");
                    }
                }
            }

            info!(list = %sync.name(), "Poller stopped");
        }
    });

    SyncHandle {
        sync,
        running,
        task: Some(task),
        updates: Some(rx),
    }
}

impl<S: ItemSource + 'static> SyncHandle<S> {
    /// The synchronizer being polled.
    pub fn synchronizer(&self) -> &Arc<PollingListSynchronizer<S>> {
        &self.sync
    }

    /// Takes the receiver of polls that added items.
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<PollOutcome>> {
        self.updates.take()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stops the timer, closes the synchronizer and waits for the task to end.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.sync.close();
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

impl<S: ItemSource + 'static> Drop for SyncHandle<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
