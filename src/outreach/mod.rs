//! Outreach module for contacting harvested addresses
//!
//! This module covers:
//! - The `Mailer` seam and its SMTP implementation
//! - Loading the HTML template used as the message body
//! - Choosing recipients from the store
//! - The batched send loop and pruning of reached addresses from the store

mod batch;
mod mailer;
mod select;
mod smtp;
mod template;

pub use batch::{send_in_batches, MessageSpec, SendReport};
pub use mailer::{MailError, Mailer, OutgoingMessage};
pub use select::{select_recipients, Selection};
pub use smtp::SmtpMailer;
pub use template::load_template;
