use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::application::config::EmailConfig;
use crate::domain::entities::AlertReport;
use crate::domain::ports::notifier::{NotificationError, Notifier};

/// Hard ceiling on SMTP connection and response time, so a hung relay
/// surfaces as a send failure instead of wedging the flush path.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers alert reports through an SMTP relay.
#[derive(Debug)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl SmtpNotifier {
    /// Build a notifier from the email section of the config.
    ///
    /// `is_ssl = true` opens an implicit-TLS (SMTPS) connection on the
    /// configured port; otherwise the connection starts in plaintext and
    /// upgrades via STARTTLS when the relay offers it.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::ChannelUnavailable` when an address fails
    /// to parse, no recipients remain after trimming, or the TLS parameters
    /// cannot be built.
    pub fn new(config: &EmailConfig) -> Result<Self, NotificationError> {
        let from = config.from_address.parse::<Mailbox>().map_err(|e| {
            NotificationError::ChannelUnavailable(format!(
                "invalid from address '{}': {e}",
                config.from_address
            ))
        })?;

        let to = config
            .to
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(|r| {
                r.parse::<Mailbox>().map_err(|e| {
                    NotificationError::ChannelUnavailable(format!("invalid recipient '{r}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if to.is_empty() {
            return Err(NotificationError::ChannelUnavailable(
                "no recipients configured".to_string(),
            ));
        }

        let tls = TlsParameters::new(config.server.clone()).map_err(|e| {
            NotificationError::ChannelUnavailable(format!("failed to build TLS parameters: {e}"))
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
            .port(config.port)
            .tls(if config.is_ssl {
                Tls::Wrapper(tls)
            } else {
                Tls::Opportunistic(tls)
            })
            .timeout(Some(SMTP_TIMEOUT));

        if !config.user.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            mailer: builder.build(),
            from,
            to,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, report: &AlertReport) -> Result<(), NotificationError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(report.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }
        let message = builder.body(report.body.clone()).map_err(|e| {
            NotificationError::SendFailed(format!("failed to build message: {e}"))
        })?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        info!(
            "alert email delivered to {} recipient(s): {}",
            self.to.len(),
            report.subject
        );
        Ok(())
    }
}
