//! Background task that purges expired short URLs.
//!
//! Resolution already hides expired records, so the reaper only reclaims
//! storage. A failed purge is logged and retried on the next tick; it never
//! reaches request handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::domain::clock::Clock;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Periodic bulk delete of records whose expiry has passed.
pub struct ExpiryReaper {
    repository: Arc<dyn UrlRepository>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl ExpiryReaper {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            repository,
            clock,
            interval,
        }
    }

    /// Runs a single purge using the clock's current time as the cutoff.
    ///
    /// Returns the number of deleted records.
    ///
    /// # Errors
    ///
    /// Propagates the store error unchanged.
    pub async fn run_once(&self) -> Result<u64, AppError> {
        let cutoff = self.clock.now();
        let purged = self.repository.delete_expired_before(cutoff).await?;

        if purged > 0 {
            info!(purged, %cutoff, "Purged expired short URLs");
            metrics::counter!("expired_urls_purged_total").increment(purged);
        } else {
            debug!(%cutoff, "No expired short URLs to purge");
        }

        Ok(purged)
    }

    async fn tick(&self) {
        if let Err(e) = self.run_once().await {
            warn!(error = %e, "Expiry purge failed, retrying on next tick");
            metrics::counter!("expiry_purge_failures_total").increment(1);
        }
    }

    /// Starts the reaper on the tokio runtime.
    ///
    /// The first purge runs immediately, then once per interval. A tick that
    /// overruns delays the following ones instead of bursting to catch up.
    pub fn spawn(self) -> ReaperHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval = ?self.interval, "Expiry reaper started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.tick().await,
                    _ = stop_rx.changed() => break,
                }
            }

            info!("Expiry reaper stopped");
        });

        ReaperHandle { stop_tx, task }
    }
}

/// Lifecycle handle for a spawned [`ExpiryReaper`].
pub struct ReaperHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the reaper to stop and waits for it to exit.
    ///
    /// A purge already in progress is allowed to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Expiry reaper task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
