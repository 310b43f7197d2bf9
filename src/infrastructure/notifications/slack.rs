//! Slack incoming-webhook channel.

use std::time::Duration;

use serde_json::{json, Value};

use crate::domain::entities::notification::NotificationMessage;
use crate::domain::ports::notifier::{NotificationError, Notifier};

const CHANNEL_ID: &str = "Slack";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts notification text to a Slack incoming webhook.
pub struct SlackNotifier {
    client: reqwest::Client,
    url: String,
}

impl SlackNotifier {
    /// Build a Slack channel targeting the given webhook URL.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidConfig` for an empty URL and
    /// `NotificationError::ChannelUnavailable` when the HTTP client cannot
    /// be initialized.
    pub fn new(url: &str) -> Result<Self, NotificationError> {
        if url.trim().is_empty() {
            return Err(NotificationError::InvalidConfig(
                "empty slack webhook url".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotificationError::ChannelUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    fn payload(msg: &NotificationMessage) -> Value {
        json!({ "text": msg.text })
    }
}

#[async_trait::async_trait]
impl Notifier for SlackNotifier {
    fn id(&self) -> &str {
        CHANNEL_ID
    }

    async fn push(&self, msg: &NotificationMessage) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.url)
            .json(&Self::payload(msg))
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::SendFailed(format!(
                "webhook returned status {status}"
            )));
        }

        tracing::info!(channel = CHANNEL_ID, "slack message sent");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_rejected() {
        assert!(matches!(
            SlackNotifier::new(""),
            Err(NotificationError::InvalidConfig(_))
        ));
        assert!(matches!(
            SlackNotifier::new("   "),
            Err(NotificationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn valid_url_builds_channel() {
        let notifier =
            SlackNotifier::new("https://hooks.slack.com/services/T00/B00/xxx").expect("notifier");
        assert_eq!(notifier.id(), "Slack");
    }

    #[test]
    fn payload_wraps_message_text() {
        let msg = NotificationMessage::critical("node-0: tempRating decreased".to_string());
        let payload = SlackNotifier::payload(&msg);
        assert_eq!(payload["text"], "node-0: tempRating decreased");
    }

    #[tokio::test]
    async fn unreachable_webhook_is_a_send_failure() {
        let notifier = SlackNotifier::new("http://127.0.0.1:1/hook").expect("notifier");
        let msg = NotificationMessage::critical("drop".to_string());
        let result = notifier.push(&msg).await;
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
