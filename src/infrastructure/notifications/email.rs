//! SMTP email channel via `lettre` (STARTTLS).

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::application::config::EmailConfig;
use crate::domain::entities::notification::NotificationMessage;
use crate::domain::ports::notifier::{NotificationError, Notifier};

const CHANNEL_ID: &str = "SimpleEmail";

const SUBJECT: &str = "Nodes rating";

/// Delivers notifications as emails through an SMTP relay.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl EmailNotifier {
    /// Build an email channel from configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidConfig` for an empty recipient
    /// list, a zero port, or unparsable mailboxes, and
    /// `NotificationError::ChannelUnavailable` when the relay cannot be
    /// initialized.
    pub fn from_config(config: &EmailConfig) -> Result<Self, NotificationError> {
        if config.to.is_empty() {
            return Err(NotificationError::InvalidConfig(
                "empty email recipient list".to_string(),
            ));
        }
        if config.port == 0 {
            return Err(NotificationError::InvalidConfig(
                "invalid email host port 0".to_string(),
            ));
        }

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e: lettre::address::AddressError| {
                NotificationError::InvalidConfig(format!("invalid from address: {e}"))
            })?;
        let to: Vec<Mailbox> = config
            .to
            .iter()
            .map(|addr| {
                addr.parse().map_err(|e: lettre::address::AddressError| {
                    NotificationError::InvalidConfig(format!("invalid recipient {addr}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotificationError::ChannelUnavailable(e.to_string()))?
            .port(config.port);

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for EmailNotifier {
    fn id(&self) -> &str {
        CHANNEL_ID
    }

    async fn push(&self, msg: &NotificationMessage) -> Result<(), NotificationError> {
        let mut builder = Message::builder().from(self.from.clone());
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }

        let email = builder
            .subject(SUBJECT)
            .body(format!("{}\n\nDetected at: {}", msg.text, msg.occurred_at))
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        tracing::info!(
            channel = CHANNEL_ID,
            recipients = self.to.len(),
            "email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn base_config() -> EmailConfig {
        EmailConfig {
            enabled: true,
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "alerts".to_string(),
            password: "secret".to_string(),
            from: "alerts@example.com".to_string(),
            to: vec!["ops@example.com".to_string()],
        }
    }

    #[test]
    fn valid_config_builds_channel() {
        let notifier = EmailNotifier::from_config(&base_config()).expect("notifier");
        assert_eq!(notifier.id(), "SimpleEmail");
        assert_eq!(notifier.to.len(), 1);
    }

    #[test]
    fn empty_recipient_list_is_rejected() {
        let config = EmailConfig {
            to: vec![],
            ..base_config()
        };
        let result = EmailNotifier::from_config(&config);
        assert!(matches!(result, Err(NotificationError::InvalidConfig(_))));
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = EmailConfig {
            port: 0,
            ..base_config()
        };
        let result = EmailNotifier::from_config(&config);
        assert!(matches!(result, Err(NotificationError::InvalidConfig(_))));
    }

    #[test]
    fn invalid_from_address_is_rejected() {
        let config = EmailConfig {
            from: "not an address".to_string(),
            ..base_config()
        };
        let result = EmailNotifier::from_config(&config);
        assert!(matches!(result, Err(NotificationError::InvalidConfig(_))));
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let config = EmailConfig {
            to: vec!["ops@example.com".to_string(), "broken@@".to_string()],
            ..base_config()
        };
        let result = EmailNotifier::from_config(&config);
        assert!(matches!(result, Err(NotificationError::InvalidConfig(_))));
    }

    #[test]
    fn display_name_mailboxes_parse() {
        let config = EmailConfig {
            from: "Node Alerts <alerts@example.com>".to_string(),
            ..base_config()
        };
        assert!(EmailNotifier::from_config(&config).is_ok());
    }
}
