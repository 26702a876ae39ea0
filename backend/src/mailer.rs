use crate::config::MailConfig;
use async_trait::async_trait;
use lettre::{
    address::AddressError,
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("mail server unavailable: {0}")]
    Unavailable(String),

    #[error("mail server did not answer within {0:?}")]
    TimedOut(Duration),
}

/// Anything able to deliver one HTML email.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError>;
}

pub struct SmtpMailer {
    host: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, TransportError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(Credentials::new(
                config.sender.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            host: config.smtp_host.clone(),
            transport,
        })
    }

    /// Opens a connection to the relay and runs the greeting, without sending anything.
    pub async fn verify(&self) -> Result<(), TransportError> {
        if self.transport.test_connection().await? {
            Ok(())
        } else {
            Err(TransportError::Unavailable(format!(
                "{} did not accept the connection",
                self.host
            )))
        }
    }
}

fn mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| TransportError::Address {
            address: address.to_string(),
            source,
        })
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError> {
        let message = Message::builder()
            .from(mailbox(&mail.from)?)
            .to(mailbox(&mail.to)?)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body)?;

        let response = self.transport.send(message).await?;
        debug!("SMTP relay {} answered {}", self.host, response.code());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparsable_addresses() {
        let err = mailbox("not an address").unwrap_err();
        assert!(matches!(err, TransportError::Address { ref address, .. } if address == "not an address"));
    }

    #[test]
    fn accepts_plain_and_named_addresses() {
        assert!(mailbox("studio@example.com").is_ok());
        assert!(mailbox("Studio <studio@example.com>").is_ok());
    }
}
