//! URL handling module for Email-Trawler
//!
//! This module provides media classification, host/scope extraction, and
//! URL normalization for the crawler.

mod domain;
mod media;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, Scope};
pub use media::{is_media, is_media_str};
pub use normalize::{normalize_start_url, normalize_url, parse_link};
