use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use crate::domain::entities::notification::EventLevel;
use crate::domain::ports::client::EventClient;
use crate::domain::ports::dispatcher::Broadcaster;

/// Lower bound on the polling period.
pub const MIN_TRIGGER_INTERVAL_SECS: u64 = 1;

#[derive(Error, Debug)]
pub enum SchedulerConfigError {
    #[error("trigger interval must be at least {MIN_TRIGGER_INTERVAL_SECS}s, got {0}")]
    IntervalTooShort(u64),
}

type ClientRegistry = Arc<RwLock<HashMap<String, Arc<dyn EventClient>>>>;

/// Drives registered detectors on a fixed interval and forwards critical
/// events to the dispatcher.
///
/// `run` spawns the tick loop on its own task and returns immediately.
/// Within one tick clients are evaluated sequentially, so exactly one
/// evaluation per client is ever in flight; a slow evaluation delays that
/// client's future ticks, it never duplicates them
/// ([`tokio::time::MissedTickBehavior::Skip`]).
pub struct EventScheduler {
    clients: ClientRegistry,
    broadcaster: Arc<dyn Broadcaster>,
    interval: Duration,
    shutdown_tx: watch::Sender<bool>,
}

impl EventScheduler {
    /// Build a scheduler with the given polling period in seconds.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerConfigError` when the interval is below
    /// [`MIN_TRIGGER_INTERVAL_SECS`].
    pub fn new(
        broadcaster: Arc<dyn Broadcaster>,
        trigger_interval_secs: u64,
    ) -> Result<Self, SchedulerConfigError> {
        if trigger_interval_secs < MIN_TRIGGER_INTERVAL_SECS {
            return Err(SchedulerConfigError::IntervalTooShort(
                trigger_interval_secs,
            ));
        }

        let (shutdown_tx, _) = watch::channel(false);
        Ok(Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            broadcaster,
            interval: Duration::from_secs(trigger_interval_secs),
            shutdown_tx,
        })
    }

    /// Register a detector under its own identifier. Last registration under
    /// a given identifier wins. Safe to call before `run`.
    pub fn add_client(&self, client: Arc<dyn EventClient>) {
        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);
        clients.insert(client.id().to_string(), client);
    }

    /// Start the polling loop on a background task and return immediately.
    pub fn run(&self) {
        let clients = Arc::clone(&self.clients);
        let broadcaster = Arc::clone(&self.broadcaster);
        let interval = self.interval;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            // Close may have been issued before the task got to run.
            if *shutdown_rx.borrow() {
                tracing::info!("event scheduler stopped before first tick");
                return;
            }

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        tracing::info!("event scheduler is stopping");
                        return;
                    }
                    _ = ticker.tick() => {
                        handle_tick(&clients, broadcaster.as_ref()).await;
                    }
                }
            }
        });
    }

    /// Signal cancellation to the running loop. Returns once the signal is
    /// issued; does not wait for an in-flight tick. Idempotent, and safe to
    /// call before `run`.
    pub fn close(&self) {
        // send_replace updates the value even when no receiver exists yet,
        // so closing before run is observed by the later-spawned loop.
        self.shutdown_tx.send_replace(true);
    }
}

/// Evaluate every registered client once. One failing client is logged and
/// skipped, it never aborts the tick for the remaining clients.
async fn handle_tick(clients: &ClientRegistry, broadcaster: &dyn Broadcaster) {
    // Snapshot the registry so the read guard is not held across awaits.
    let tick_clients: Vec<Arc<dyn EventClient>> = clients
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .values()
        .cloned()
        .collect();

    for client in tick_clients {
        let msg = match client.evaluate().await {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!(client = client.id(), error = %e, "failed to evaluate client");
                continue;
            }
        };

        match msg.level {
            EventLevel::Critical => {
                tracing::info!(client = client.id(), "critical event, dispatching");
                broadcaster.broadcast(&msg);
            }
            EventLevel::Info => {
                tracing::info!(client = client.id(), "info event, no notification");
            }
            EventLevel::NoEvent => {
                tracing::debug!(client = client.id(), "no event");
            }
        }
    }
}
