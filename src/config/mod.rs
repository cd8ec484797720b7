//! Configuration module for Email-Trawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use email_trawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will run {} fetches at once", config.crawler.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, OutreachConfig, SenderConfig, SmtpConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, ensure_config_file, load_config, load_config_with_hash, parse_config,
};
