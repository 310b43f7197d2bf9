use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::domain::entities::node::NodeSnapshot;
use crate::domain::entities::notification::NotificationMessage;
use crate::domain::ports::client::EventClient;
use crate::domain::ports::source::{SnapshotSource, SourceError};

/// Normalization constant for the change-percentage formula. Ratings live
/// on a 0..=100 scale.
const MAX_RATING_SCALE: f64 = 100.0;

const DETECTOR_ID: &str = "NodeRating";

#[derive(Error, Debug)]
pub enum DetectorConfigError {
    #[error("no node public keys configured")]
    EmptyPubKeys,
    #[error("rating drift threshold must be strictly positive, got {0}")]
    InvalidThreshold(f64),
}

/// Per-detector, process-lifetime state. A missing `baselines` entry is the
/// "never observed" sentinel for that node.
#[derive(Debug, Default)]
struct DetectorState {
    baselines: HashMap<String, f64>,
    completed_first_cycle: bool,
}

/// Stateful rating-drift detector: turns successive API snapshots into one
/// classified message per cycle.
///
/// The first successful cycle only seeds baselines and always returns
/// `NoEvent`. Every later cycle compares each node against the immediately
/// preceding cycle's rating and refreshes the baseline, whether or not the
/// node triggered. A fetch error aborts the cycle before any state change.
pub struct RatingDriftDetector {
    source: Arc<dyn SnapshotSource>,
    pub_keys: Vec<String>,
    threshold: f64,
    state: Mutex<DetectorState>,
}

impl RatingDriftDetector {
    /// Build a detector for the given public keys and threshold (percent).
    ///
    /// # Errors
    ///
    /// Returns `DetectorConfigError` when no public keys are configured or
    /// the threshold is not strictly positive.
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        pub_keys: Vec<String>,
        threshold: f64,
    ) -> Result<Self, DetectorConfigError> {
        if pub_keys.is_empty() {
            return Err(DetectorConfigError::EmptyPubKeys);
        }
        if threshold <= 0.0 {
            return Err(DetectorConfigError::InvalidThreshold(threshold));
        }

        Ok(Self {
            source,
            pub_keys,
            threshold,
            state: Mutex::new(DetectorState::default()),
        })
    }

    /// Fetch one snapshot per configured key. The first failure aborts the
    /// whole cycle so partial results never reach the baseline map.
    async fn fetch_all(&self) -> Result<Vec<NodeSnapshot>, SourceError> {
        let mut snapshots = Vec::with_capacity(self.pub_keys.len());
        for pub_key in &self.pub_keys {
            snapshots.push(self.source.fetch_node(pub_key).await?);
        }
        Ok(snapshots)
    }

    /// Compare fetched snapshots against baselines and update them. Runs
    /// entirely under the state lock, with no await points.
    fn classify(&self, snapshots: &[NodeSnapshot]) -> NotificationMessage {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if !state.completed_first_cycle {
            for node in snapshots {
                state.baselines.insert(node.bls.clone(), node.temp_rating);
            }
            state.completed_first_cycle = true;
            tracing::info!(
                client = DETECTOR_ID,
                nodes = snapshots.len(),
                "first cycle, baselines seeded"
            );
            return NotificationMessage::no_event();
        }

        let mut text = String::new();
        let mut triggered = false;

        for node in snapshots {
            if let Some(previous) = state.baselines.get(&node.bls).copied() {
                let diff = node.temp_rating - previous;
                if diff < 0.0 {
                    let change_percentage = diff.abs() / MAX_RATING_SCALE * 100.0;
                    if change_percentage > self.threshold {
                        triggered = true;
                        let _ = writeln!(
                            text,
                            "{}: tempRating decreased more than {:.1}%, current value: {:.2}, last value: {:.2}",
                            node.name, self.threshold, node.temp_rating, previous,
                        );
                    }
                }
            }
            // Baseline always tracks the immediately preceding cycle, a
            // node seen for the first time is seeded without comparison.
            state.baselines.insert(node.bls.clone(), node.temp_rating);
        }

        if triggered {
            NotificationMessage::critical(text)
        } else {
            NotificationMessage::info(text)
        }
    }
}

#[async_trait::async_trait]
impl EventClient for RatingDriftDetector {
    fn id(&self) -> &str {
        DETECTOR_ID
    }

    async fn evaluate(&self) -> Result<NotificationMessage, SourceError> {
        let snapshots = self.fetch_all().await?;
        Ok(self.classify(&snapshots))
    }
}
