//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop, which:
//! - Seeds the scheduler with the start URL
//! - Keeps up to `max-concurrent-fetches` fetch+extract jobs in flight
//! - Folds each finished job into the result (emails, counters, new links)
//! - Stops once the frontier is empty and no job is in flight
//!
//! Worker tasks only own their URL and a client handle. The frontier, visited
//! set and email set stay with the coordinator task, so no locking is needed.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::scheduler::Scheduler;
use crate::extract::extract_emails;
use crate::url::parse_link;
use crate::TrawlerError;
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// How often (in finished jobs) a progress line is logged
const PROGRESS_INTERVAL: usize = 10;

/// Final outcome of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    /// Every unique validated address found
    pub emails: BTreeSet<String>,

    /// Pages fetched successfully
    pub pages_scanned: usize,

    /// Fetch attempts that failed (transport error, timeout, non-2xx)
    pub pages_failed: usize,
}

impl CrawlResult {
    /// The found addresses as a sorted list
    pub fn email_list(&self) -> Vec<String> {
        self.emails.iter().cloned().collect()
    }
}

/// What a single fetch+extract job reports back
#[derive(Debug)]
enum PageOutcome {
    Scanned {
        url: Url,
        emails: BTreeSet<String>,
        links: Vec<String>,
    },
    Failed {
        url: Url,
        reason: String,
    },
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlerConfig,
    scheduler: Scheduler,
    client: Client,
    start_url: Url,
}

impl Coordinator {
    /// Creates a new coordinator for one crawl
    ///
    /// # Arguments
    ///
    /// * `config` - The application configuration
    /// * `start_url` - Absolute HTTP(S) URL the crawl starts from
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(TrawlerError)` - The start URL is invalid or the client failed to build
    pub fn new(config: &Config, start_url: &str) -> Result<Self, TrawlerError> {
        let start_url = parse_link(start_url)?;
        let scheduler = Scheduler::new(&start_url)?;
        let client = build_http_client(config)?;

        Ok(Self {
            config: config.crawler.clone(),
            scheduler,
            client,
            start_url,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Individual fetch failures are logged and counted; they never end the
    /// crawl early.
    pub async fn run(mut self) -> Result<CrawlResult, TrawlerError> {
        tracing::info!(
            "Starting crawl of {} (scope: {}, {} concurrent fetches)",
            self.start_url,
            self.scheduler.scope().host(),
            self.config.max_concurrent_fetches
        );

        let max_in_flight = self.config.max_concurrent_fetches.max(1) as usize;
        let delay = Duration::from_millis(self.config.request_delay);
        let start_time = Instant::now();

        let mut result = CrawlResult::default();
        let mut in_flight: JoinSet<PageOutcome> = JoinSet::new();
        let mut finished = 0;

        loop {
            // Top up the worker pool from the frontier
            while in_flight.len() < max_in_flight {
                match self.scheduler.next_url() {
                    Some(url) => {
                        tracing::debug!("Dispatching {}", url);
                        in_flight.spawn(process_url(self.client.clone(), url, delay));
                    }
                    None => break,
                }
            }

            // Nothing in flight after a top-up means the frontier is empty too
            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            match joined {
                Ok(outcome) => self.record_outcome(outcome, &mut result),
                Err(e) => {
                    tracing::error!("Worker task failed: {}", e);
                    result.pages_failed += 1;
                }
            }

            finished += 1;
            if finished % PROGRESS_INTERVAL == 0 {
                let rate = finished as f64 / start_time.elapsed().as_secs_f64().max(0.001);
                tracing::info!(
                    "Progress: {} pages scanned, {} failed, {} in frontier, {} in flight, {:.2} pages/sec",
                    result.pages_scanned,
                    result.pages_failed,
                    self.scheduler.frontier_size(),
                    in_flight.len(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages scanned, {} failed, {} unique emails in {:?}",
            result.pages_scanned,
            result.pages_failed,
            result.emails.len(),
            start_time.elapsed()
        );

        Ok(result)
    }

    /// Folds one finished job into the crawl result
    fn record_outcome(&mut self, outcome: PageOutcome, result: &mut CrawlResult) {
        match outcome {
            PageOutcome::Scanned { url, emails, links } => {
                result.pages_scanned += 1;
                let new_emails = emails
                    .into_iter()
                    .filter(|email| result.emails.insert(email.clone()))
                    .count();
                let enqueued = self.scheduler.enqueue_links(&links);

                tracing::info!("Scanned page {}: {}", result.pages_scanned, url);
                tracing::debug!(
                    "{}: {} new emails, {} of {} links enqueued",
                    url,
                    new_emails,
                    enqueued,
                    links.len()
                );
            }
            PageOutcome::Failed { url, reason } => {
                result.pages_failed += 1;
                tracing::warn!("Failed to retrieve {}: {}", url, reason);
            }
        }
    }
}

/// Fetches one page, extracts its emails, then waits out the courtesy delay
///
/// The delay keeps this worker slot busy without holding up other workers.
async fn process_url(client: Client, url: Url, delay: Duration) -> PageOutcome {
    let fetch_result = fetch_page(&client, &url).await;

    let outcome = match fetch_result {
        FetchResult::Success { body, links, .. } => PageOutcome::Scanned {
            emails: extract_emails(&body),
            url,
            links,
        },
        failure => PageOutcome::Failed {
            reason: failure.failure_reason().unwrap_or_default(),
            url,
        },
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    outcome
}

/// Runs a complete crawl from a start URL
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `start_url` - Absolute HTTP(S) URL the crawl starts from
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Emails found and page counters
/// * `Err(TrawlerError)` - The crawl could not start
///
/// # Example
///
/// ```no_run
/// use email_trawler::config::Config;
/// use email_trawler::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = crawl(&Config::default(), "https://example.com/").await?;
/// println!("{} emails on {} pages", result.emails.len(), result.pages_scanned);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, start_url: &str) -> Result<CrawlResult, TrawlerError> {
    Coordinator::new(config, start_url)?.run().await
}
