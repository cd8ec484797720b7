//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a configured identity and timeout
//! - HTML parsing and link extraction
//! - Frontier scheduling with a visited set and scope filtering
//! - Overall crawl coordination over a bounded worker pool

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{crawl, Coordinator, CrawlResult};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use parser::extract_links;
pub use scheduler::Scheduler;
