use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::config::AppConfig;
use crate::application::services::dispatcher::NotifyDispatcher;
use crate::application::services::drift::RatingDriftDetector;
use crate::application::services::scheduler::EventScheduler;
use crate::domain::ports::dispatcher::Broadcaster;
use crate::domain::ports::notifier::Notifier;
use crate::infrastructure::notifications::email::EmailNotifier;
use crate::infrastructure::notifications::slack::SlackNotifier;
use crate::infrastructure::sources::api_source::ApiSnapshotSource;

/// Wires the component graph from configuration and starts the scheduler.
/// main.rs and this module are the only places that know concrete types.
pub struct MonitoringRunner {
    config: AppConfig,
}

impl MonitoringRunner {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build source → detector → dispatcher → scheduler, start the polling
    /// loop, and return the scheduler handle for shutdown.
    ///
    /// # Errors
    ///
    /// Returns construction errors from any component (invalid threshold,
    /// empty key set, bad channel configuration, sub-minimum interval).
    pub fn start(&self) -> Result<EventScheduler> {
        let rating_cfg = &self.config.alarms.node_rating;

        let source = ApiSnapshotSource::new(
            &rating_cfg.api_url,
            self.config.general.request_timeout_secs,
        )
        .context("failed to build API snapshot source")?;

        let dispatcher = Arc::new(NotifyDispatcher::new());
        for notifier in self.build_notifiers()? {
            dispatcher.add_notifier(notifier);
        }
        if dispatcher.channel_count() == 0 {
            tracing::warn!("no notification channels enabled, critical events will only be logged");
        }

        let detector = RatingDriftDetector::new(
            Arc::new(source),
            rating_cfg.pub_keys.clone(),
            rating_cfg.threshold,
        )
        .context("failed to build node rating detector")?;

        let scheduler = EventScheduler::new(
            Arc::clone(&dispatcher) as Arc<dyn Broadcaster>,
            self.config.general.trigger_interval_secs,
        )
        .context("failed to build event scheduler")?;
        scheduler.add_client(Arc::new(detector));

        scheduler.run();
        tracing::info!(
            interval_secs = self.config.general.trigger_interval_secs,
            nodes = rating_cfg.pub_keys.len(),
            channels = dispatcher.channel_count(),
            "monitoring started"
        );

        Ok(scheduler)
    }

    fn build_notifiers(&self) -> Result<Vec<Arc<dyn Notifier>>> {
        let mut notifiers: Vec<Arc<dyn Notifier>> = vec![];

        if self.config.notifiers.email.enabled {
            let email = EmailNotifier::from_config(&self.config.notifiers.email)
                .context("failed to build email notifier")?;
            notifiers.push(Arc::new(email));
        }
        if self.config.notifiers.slack.enabled {
            let slack = SlackNotifier::new(&self.config.notifiers.slack.url)
                .context("failed to build slack notifier")?;
            notifiers.push(Arc::new(slack));
        }

        Ok(notifiers)
    }
}
