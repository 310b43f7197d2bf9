use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of one polling cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventLevel {
    /// Nothing to report (first baseline-seeding cycle).
    NoEvent,
    /// A cycle was evaluated, nothing crossed its threshold.
    Info,
    /// At least one node crossed its drift threshold.
    Critical,
}

impl std::fmt::Display for EventLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoEvent => write!(f, "NO_EVENT"),
            Self::Info => write!(f, "INFO"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// The unit of detector output, consumed exactly once per cycle by the
/// scheduler and forwarded to the dispatcher only when `level` is
/// [`EventLevel::Critical`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub level: EventLevel,
    /// Human-readable summary, may aggregate several node findings.
    pub text: String,
    pub occurred_at: DateTime<Utc>,
}

impl NotificationMessage {
    #[must_use]
    pub fn no_event() -> Self {
        Self {
            level: EventLevel::NoEvent,
            text: String::new(),
            occurred_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn info(text: String) -> Self {
        Self {
            level: EventLevel::Info,
            text,
            occurred_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn critical(text: String) -> Self {
        Self {
            level: EventLevel::Critical,
            text,
            occurred_at: Utc::now(),
        }
    }
}
