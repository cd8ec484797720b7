//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured identity and timeout
//! - GET requests to fetch page content
//! - Link extraction from successful responses
//! - Error classification

use crate::config::Config;
use crate::crawler::parser::extract_links;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
        /// Absolute outbound links found on the page
        links: Vec<String>,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the client timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Returns true for [`FetchResult::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short description of a failed fetch, None on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error, .. } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The User-Agent header comes from `[user-agent] identity` (a browser-like
/// string by default, since many sites turn away unknown clients) and every
/// request is bounded by `[crawler] request-timeout`.
///
/// # Example
///
/// ```
/// use email_trawler::config::Config;
/// use email_trawler::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.identity.as_str())
        .timeout(Duration::from_secs(config.crawler.request_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and extracts its outbound links
///
/// Links are resolved against the final URL after redirects. Failures are
/// returned as values; callers decide whether to log and move on.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();

    match response.text().await {
        Ok(body) => {
            let links = extract_links(&body, &final_url);
            FetchResult::Success {
                final_url,
                status_code: status.as_u16(),
                body,
                links,
            }
        }
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
