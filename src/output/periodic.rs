use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::AppResult;
use crate::shutdown::{ShutdownSender, shutdown_channel};

use super::flush::FlushPipeline;

/// Background task running one flush per push interval, plus a final flush
/// once stopped. Flushes never overlap: the next tick waits for the current
/// flush, and ticks missed meanwhile are skipped.
pub struct PeriodicFlusher {
    shutdown_tx: ShutdownSender,
    handle: JoinHandle<FlushPipeline>,
}

impl PeriodicFlusher {
    #[must_use]
    pub fn spawn(mut pipeline: FlushPipeline, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        let handle = tokio::spawn(async move {
            let first_tick = Instant::now()
                .checked_add(interval)
                .unwrap_or_else(Instant::now);
            let mut ticker = tokio::time::interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        pipeline.flush().await;
                    }
                }
            }

            pipeline.flush().await;
            pipeline
        });
        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Signals the task and waits for its final flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush task panicked or was cancelled.
    pub async fn stop(self) -> AppResult<FlushPipeline> {
        drop(self.shutdown_tx.send(()));
        Ok(self.handle.await?)
    }
}
