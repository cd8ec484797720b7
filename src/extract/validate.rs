//! Structural email address validation
//!
//! Checks the rules that decide whether an address could be delivered at
//! all: part lengths, label shapes, character sets, and reserved top-level
//! names. No DNS lookups are made.

use thiserror::Error;

/// Maximum length of a whole address
const MAX_ADDRESS_LEN: usize = 254;

/// Maximum length of the local part
const MAX_LOCAL_LEN: usize = 64;

/// Maximum length of the domain part
const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single domain label
const MAX_LABEL_LEN: usize = 63;

/// Top-level names reserved for special use; mail to them is never delivered
const SPECIAL_USE_TLDS: &[&str] = &["arpa", "invalid", "local", "localhost", "onion", "test"];

/// Punctuation allowed in an unquoted local part besides letters, digits and dots
const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-";

/// Reasons an address is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailValidationError {
    #[error("address must contain exactly one '@'")]
    MissingAt,

    #[error("address is {0} characters long (max 254)")]
    TooLong(usize),

    #[error("invalid local part: {0}")]
    LocalPart(String),

    #[error("invalid domain: {0}")]
    Domain(String),

    #[error("domain uses the special-use name '{0}'")]
    SpecialUseDomain(String),
}

/// Validates an address and returns its canonical form
///
/// The canonical form keeps the local part as written and lowercases the
/// domain.
///
/// # Examples
///
/// ```
/// use email_trawler::extract::validate_email;
///
/// assert_eq!(
///     validate_email("Jane.Doe@Example.COM").unwrap(),
///     "Jane.Doe@example.com"
/// );
/// assert!(validate_email("jane..doe@example.com").is_err());
/// assert!(validate_email("jane@example.123").is_err());
/// ```
pub fn validate_email(address: &str) -> Result<String, EmailValidationError> {
    let (local, domain) = match address.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => (local, domain),
        _ => return Err(EmailValidationError::MissingAt),
    };

    if address.len() > MAX_ADDRESS_LEN {
        return Err(EmailValidationError::TooLong(address.len()));
    }

    validate_local_part(local)?;
    let domain = validate_domain(domain)?;

    Ok(format!("{}@{}", local, domain))
}

fn validate_local_part(local: &str) -> Result<(), EmailValidationError> {
    if local.is_empty() {
        return Err(EmailValidationError::LocalPart("empty".to_string()));
    }

    if local.len() > MAX_LOCAL_LEN {
        return Err(EmailValidationError::LocalPart(format!(
            "{} characters long (max {})",
            local.len(),
            MAX_LOCAL_LEN
        )));
    }

    if local.starts_with('.') || local.ends_with('.') {
        return Err(EmailValidationError::LocalPart(
            "cannot start or end with '.'".to_string(),
        ));
    }

    if local.contains("..") {
        return Err(EmailValidationError::LocalPart(
            "cannot contain consecutive dots".to_string(),
        ));
    }

    if let Some(bad) = local
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || LOCAL_SPECIALS.contains(*c)))
    {
        return Err(EmailValidationError::LocalPart(format!(
            "character {:?} is not allowed",
            bad
        )));
    }

    Ok(())
}

fn validate_domain(domain: &str) -> Result<String, EmailValidationError> {
    if domain.is_empty() {
        return Err(EmailValidationError::Domain("empty".to_string()));
    }

    if domain.len() > MAX_DOMAIN_LEN {
        return Err(EmailValidationError::Domain(format!(
            "{} characters long (max {})",
            domain.len(),
            MAX_DOMAIN_LEN
        )));
    }

    let domain = domain.to_ascii_lowercase();
    let labels: Vec<&str> = domain.split('.').collect();

    if labels.len() < 2 {
        return Err(EmailValidationError::Domain(format!(
            "'{}' has no top-level domain",
            domain
        )));
    }

    for label in &labels {
        validate_label(label)?;
    }

    // split always yields at least one element
    let tld = labels[labels.len() - 1];

    if tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(EmailValidationError::Domain(format!(
            "top-level domain '{}' is numeric",
            tld
        )));
    }

    if SPECIAL_USE_TLDS.contains(&tld) {
        return Err(EmailValidationError::SpecialUseDomain(tld.to_string()));
    }

    Ok(domain)
}

fn validate_label(label: &str) -> Result<(), EmailValidationError> {
    if label.is_empty() {
        return Err(EmailValidationError::Domain(
            "empty label (consecutive, leading or trailing dot)".to_string(),
        ));
    }

    if label.len() > MAX_LABEL_LEN {
        return Err(EmailValidationError::Domain(format!(
            "label '{}' is longer than {} characters",
            label, MAX_LABEL_LEN
        )));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(EmailValidationError::Domain(format!(
            "label '{}' cannot start or end with '-'",
            label
        )));
    }

    if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(EmailValidationError::Domain(format!(
            "label '{}' contains invalid characters",
            label
        )));
    }

    Ok(())
}
