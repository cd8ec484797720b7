//! Email-Trawler: a same-site email harvester
//!
//! This crate crawls a single website breadth-first, extracts and validates the
//! email addresses found on its pages, keeps them in a JSON store, and sends a
//! fixed message to stored addresses in batches.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod outreach;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Email-Trawler operations
#[derive(Debug, Error)]
pub enum TrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Template error for {path}: {message}")]
    Template { path: String, message: String },

    #[error("No stored email number {index} (the store holds {available})")]
    Selection { index: usize, available: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Email-Trawler operations
pub type Result<T> = std::result::Result<T, TrawlerError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlResult};
pub use extract::{extract_emails, validate_email};
pub use crate::url::{is_media, normalize_start_url};
