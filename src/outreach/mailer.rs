//! Mail transport seam
//!
//! The crate ships no transport of its own. Anything that can deliver one
//! message implements [`Mailer`].

use thiserror::Error;

/// A transport failed to deliver a message
#[derive(Debug, Error)]
#[error("Failed to send to {recipient}: {message}")]
pub struct MailError {
    pub recipient: String,
    pub message: String,
}

impl MailError {
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
        }
    }
}

/// One fully addressed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// HTML body, sent as-is
    pub html_body: String,
}

/// Delivers single messages
pub trait Mailer {
    fn send(&self, message: &OutgoingMessage) -> Result<(), MailError>;
}
