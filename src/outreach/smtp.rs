//! SMTP delivery through `lettre`
//!
//! The transport upgrades the connection with STARTTLS and logs in with the
//! sender address and the configured password.

use crate::config::{SenderConfig, SmtpConfig};
use crate::outreach::mailer::{MailError, Mailer, OutgoingMessage};
use crate::{ConfigError, TrawlerError};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// [`Mailer`] backed by a blocking SMTP connection
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Builds the transport from `[sender]` and `[smtp]`
    ///
    /// No connection is opened until the first send.
    pub fn from_config(sender: &SenderConfig, smtp: &SmtpConfig) -> Result<Self, TrawlerError> {
        let transport = SmtpTransport::starttls_relay(&smtp.server)
            .map_err(|e| {
                ConfigError::Validation(format!("smtp server '{}': {}", smtp.server, e))
            })?
            .port(smtp.port)
            .credentials(Credentials::new(
                sender.address.clone(),
                smtp.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &OutgoingMessage) -> Result<(), MailError> {
        let email = build_message(message)?;
        self.transport
            .send(&email)
            .map_err(|e| MailError::new(&message.to, e.to_string()))?;
        Ok(())
    }
}

/// Turns an outgoing message into an HTML email
fn build_message(message: &OutgoingMessage) -> Result<Message, MailError> {
    let from: Mailbox = message
        .from
        .parse()
        .map_err(|e| MailError::new(&message.to, format!("bad sender address: {}", e)))?;
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e| MailError::new(&message.to, format!("bad recipient address: {}", e)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(message.html_body.clone())
        .map_err(|e| MailError::new(&message.to, e.to_string()))
}
