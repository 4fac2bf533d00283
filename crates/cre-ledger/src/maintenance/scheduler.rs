//! MaintenanceScheduler: runs decay and the penalty sweep on a fixed period.
//!
//! Ticks are awaited one at a time, so passes never overlap; missed ticks are
//! skipped rather than bursted. Errors are logged and swallowed: losing one
//! pass is recoverable, stopping the loop is not.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::engine::ResolutionEngine;

/// Spawns the maintenance loop.
pub struct MaintenanceScheduler;

impl MaintenanceScheduler {
    /// Spawn on the current tokio runtime using `trust.decay_interval_secs`.
    pub fn spawn_from_config(engine: Arc<ResolutionEngine>) -> MaintenanceHandle {
        let interval = Duration::from_secs(engine.config().trust.decay_interval_secs);
        Self::spawn(engine, interval)
    }

    /// Spawn on the current tokio runtime. The first pass runs one full
    /// `interval` after spawning.
    pub fn spawn(engine: Arc<ResolutionEngine>, interval: Duration) -> MaintenanceHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(interval_secs = interval.as_secs_f64(), "maintenance loop started");

            let mut passes: u64 = 0;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match engine.run_maintenance().await {
                            Ok(report) => debug!(
                                decayed = report.decayed,
                                penalties = report.penalties,
                                "maintenance pass complete"
                            ),
                            Err(e) => warn!(error = %e, "maintenance pass failed"),
                        }
                        passes += 1;
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!(passes, "maintenance loop stopped");
            passes
        });

        MaintenanceHandle { shutdown_tx, task }
    }
}

/// Stops the maintenance loop.
pub struct MaintenanceHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<u64>,
}

impl MaintenanceHandle {
    /// Signal shutdown and wait for the loop to exit. A pass in flight runs
    /// to completion first. Returns the number of passes run.
    pub async fn shutdown(self) -> u64 {
        let _ = self.shutdown_tx.send(true);
        match self.task.await {
            Ok(passes) => passes,
            Err(e) => {
                warn!(error = %e, "maintenance task ended abnormally");
                0
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
