use thiserror::Error;

use crate::domain::entities::notification::NotificationMessage;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to send notification: {0}")]
    SendFailed(String),
    #[error("notification channel unavailable: {0}")]
    ChannelUnavailable(String),
    #[error("invalid channel configuration: {0}")]
    InvalidConfig(String),
}

/// A delivery channel behind a uniform send contract.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Stable, human-readable identifier used as the registry key
    /// (e.g. `"SimpleEmail"`, `"Slack"`).
    fn id(&self) -> &str;

    /// Attempt delivery of one message via this channel's transport.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` when the transport rejects the message;
    /// the failure is the channel's own concern and is never escalated.
    async fn push(&self, msg: &NotificationMessage) -> Result<(), NotificationError>;
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn notification_error_display() {
        let err = NotificationError::SendFailed("smtp timeout".to_string());
        assert_eq!(err.to_string(), "failed to send notification: smtp timeout");

        let err = NotificationError::InvalidConfig("empty url".to_string());
        assert_eq!(err.to_string(), "invalid channel configuration: empty url");
    }
}
