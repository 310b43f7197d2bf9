use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::entities::notification::NotificationMessage;
use crate::domain::ports::dispatcher::Broadcaster;
use crate::domain::ports::notifier::Notifier;

/// Fans one critical message out to every registered channel, concurrently
/// and independently.
///
/// Delivery is at-most-best-effort by design: one task is spawned per
/// channel and never joined, so a failing or slow channel cannot affect
/// another channel or the caller. There is no delivery confirmation.
pub struct NotifyDispatcher {
    notifiers: RwLock<HashMap<String, Arc<dyn Notifier>>>,
}

impl NotifyDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifiers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a channel under its own identifier. Last registration under
    /// a given identifier wins.
    pub fn add_notifier(&self, notifier: Arc<dyn Notifier>) {
        let mut notifiers = self
            .notifiers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        notifiers.insert(notifier.id().to_string(), notifier);
    }

    /// Number of currently registered channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.notifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for NotifyDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for NotifyDispatcher {
    fn broadcast(&self, msg: &NotificationMessage) {
        // Clone the handles under the read lock, spawn outside it.
        let targets: Vec<Arc<dyn Notifier>> = self
            .notifiers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        if targets.is_empty() {
            tracing::debug!("no notification channels registered");
            return;
        }

        for notifier in targets {
            let msg = msg.clone();
            tokio::spawn(async move {
                match notifier.push(&msg).await {
                    Ok(()) => {
                        tracing::info!(channel = notifier.id(), "notification delivered");
                    }
                    Err(e) => {
                        tracing::warn!(
                            channel = notifier.id(),
                            error = %e,
                            "notification delivery failed"
                        );
                    }
                }
            });
        }
    }
}
