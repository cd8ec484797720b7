//! Batched sending
//!
//! Recipients are sent to one at a time, in fixed-size batches with a pause
//! between batches. Once the loop finishes, every address that was delivered
//! is removed from the store so it is not contacted again.

use crate::config::{OutreachConfig, SenderConfig};
use crate::outreach::mailer::{Mailer, OutgoingMessage};
use crate::outreach::template::template_error;
use crate::storage::{remove_sent, EmailStore};
use crate::TrawlerError;
use std::path::Path;
use std::time::Duration;

/// The parts of a message shared by every recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSpec {
    pub from: String,
    pub subject: String,
    pub html_body: String,
}

impl MessageSpec {
    pub fn new(
        from: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
            html_body: html_body.into(),
        }
    }

    /// Builds a message from the `[sender]` section and a loaded template
    pub fn from_sender(sender: &SenderConfig, html_body: impl Into<String>) -> Self {
        Self::new(&sender.address, &sender.subject, html_body)
    }

    fn addressed_to(&self, recipient: &str) -> OutgoingMessage {
        OutgoingMessage {
            from: self.from.clone(),
            to: recipient.to_string(),
            subject: self.subject.clone(),
            html_body: self.html_body.clone(),
        }
    }
}

/// Outcome of a batched send
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReport {
    /// Recipients the mailer accepted, in send order
    pub sent: Vec<String>,

    /// Recipients the mailer rejected, in send order
    pub failed: Vec<String>,

    /// Number of batches processed
    pub batches: usize,

    /// Entries removed from the store afterwards
    pub removed: usize,
}

/// Sends `message` to every recipient in batches, then prunes the store
///
/// Individual send failures are logged and collected; they do not stop the
/// loop. The store is rewritten once, after the last batch.
///
/// # Returns
///
/// * `Ok(SendReport)` - Who was reached and who was not
/// * `Err(TrawlerError::Template)` - The message body is blank; nothing was sent
/// * `Err(TrawlerError::Store)` - The store could not be updated
pub async fn send_in_batches<M, S>(
    mailer: &M,
    store: &mut S,
    recipients: &[String],
    message: &MessageSpec,
    config: &OutreachConfig,
) -> Result<SendReport, TrawlerError>
where
    M: Mailer + ?Sized,
    S: EmailStore + ?Sized,
{
    if message.html_body.trim().is_empty() {
        return Err(template_error(
            Path::new(&config.template_path),
            "template is empty",
        ));
    }

    let batch_size = config.batch_size.max(1);
    let delay = Duration::from_millis(config.batch_delay);
    let mut report = SendReport::default();

    tracing::info!(
        "Sending to {} recipients in batches of {}",
        recipients.len(),
        batch_size
    );

    let mut batches = recipients.chunks(batch_size).peekable();
    while let Some(batch) = batches.next() {
        report.batches += 1;
        tracing::debug!("Batch {}: {} recipients", report.batches, batch.len());

        for recipient in batch {
            match mailer.send(&message.addressed_to(recipient)) {
                Ok(()) => {
                    tracing::info!("Email sent to {}", recipient);
                    report.sent.push(recipient.clone());
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    report.failed.push(recipient.clone());
                }
            }
        }

        if batches.peek().is_some() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    report.removed = remove_sent(store, &report.sent)?;

    if !report.failed.is_empty() {
        tracing::warn!(
            "The following emails failed to send: {}",
            report.failed.join(", ")
        );
    }

    Ok(report)
}
