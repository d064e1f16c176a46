//! Reclamation sweeper.
//!
//! Periodically removes expired bindings from the store. Correctness does
//! not depend on it (reads already hide expired bindings); it only bounds
//! memory. A failed pass is logged and retried on the next tick.

use crate::clock::Clock;
use crate::error::MaskmailError;
use crate::store::BindingStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct Sweeper {
    store: Arc<dyn BindingStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl Sweeper {
    pub fn new(store: Arc<dyn BindingStore>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    /// Run a single sweep pass at the clock's current time
    pub async fn run_once(&self) -> Result<usize, MaskmailError> {
        let now = self.clock.now();
        let removed = self.store.sweep_expired(now).await?;

        if removed > 0 {
            info!(removed = removed, "Reclaimed expired bindings");
        } else {
            debug!("Sweep found no expired bindings");
        }
        Ok(removed)
    }

    /// Start the periodic loop on the current tokio runtime
    ///
    /// The first pass runs one full interval after spawning.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let interval = self.interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            info!(interval_secs = interval.as_secs(), "Reclamation sweeper started");
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_once().await {
                            error!(error = %e, "Sweep pass failed, retrying next tick");
                        }
                    }
                }
            }
            info!("Reclamation sweeper stopped");
        });

        SweeperHandle {
            shutdown_tx,
            handle: Some(handle),
        }
    }
}

/// Owner of a running sweeper; dropping it stops the loop
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Signal the loop to stop and wait for it to finish
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
