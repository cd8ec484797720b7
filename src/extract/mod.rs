//! Email extraction module
//!
//! Turns page HTML into a set of validated, canonical email addresses:
//! - Markup is stripped to visible text
//! - Address-shaped substrings are found with a regex scan
//! - Each candidate is checked by a structural validator

mod email;
mod validate;

pub use email::{extract_emails, extract_emails_from_text, html_to_text};
pub use validate::{validate_email, EmailValidationError};
