//! Scheduler for managing the crawl frontier
//!
//! This module handles:
//! - The FIFO frontier of URLs awaiting a fetch (breadth-first order)
//! - The visited set that guarantees one fetch attempt per URL
//! - Same-scope, media and scheme filtering of discovered links
//!
//! The scheduler is owned by a single task (the coordinator), so the
//! visited-set check and insert in [`Scheduler::next_url`] happen as one step.

use crate::url::{is_media, normalize_url, parse_link, Scope};
use crate::UrlError;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Scheduler manages the frontier queue and visited set
///
/// The frontier may hold duplicates; they are discarded when dequeued.
#[derive(Debug)]
pub struct Scheduler {
    /// Host (and port) every followed link must share with the start URL
    scope: Scope,

    /// URLs waiting to be fetched, oldest first
    frontier: VecDeque<Url>,

    /// Normalized URLs already handed out for fetching
    visited: HashSet<String>,

    /// Dequeued URLs dropped because they were already visited or media
    skipped: usize,
}

impl Scheduler {
    /// Creates a scheduler seeded with the start URL
    ///
    /// # Returns
    ///
    /// * `Ok(Scheduler)` - Scheduler with a one-entry frontier
    /// * `Err(UrlError)` - The start URL has no host to scope the crawl to
    pub fn new(start_url: &Url) -> Result<Self, UrlError> {
        let scope =
            Scope::of(start_url).ok_or_else(|| UrlError::MissingHost(start_url.to_string()))?;

        let mut frontier = VecDeque::new();
        frontier.push_back(normalize_url(start_url));

        Ok(Self {
            scope,
            frontier,
            visited: HashSet::new(),
            skipped: 0,
        })
    }

    /// Gets the next URL to fetch
    ///
    /// Pops the frontier in FIFO order, skipping URLs that were already
    /// visited or point at media. The returned URL is marked visited before
    /// it is handed out.
    ///
    /// # Returns
    ///
    /// * `Some(Url)` - A URL that has never been handed out before
    /// * `None` - The frontier is empty
    pub fn next_url(&mut self) -> Option<Url> {
        while let Some(url) = self.frontier.pop_front() {
            if is_media(&url) {
                tracing::trace!("Skipping media URL {}", url);
                self.skipped += 1;
                continue;
            }

            // insert returns false when the URL was already present
            if !self.visited.insert(url.as_str().to_string()) {
                tracing::trace!("Skipping visited URL {}", url);
                self.skipped += 1;
                continue;
            }

            return Some(url);
        }

        None
    }

    /// Filters discovered links and appends the survivors to the frontier
    ///
    /// A link is kept when it parses as HTTP(S), is inside the start URL's
    /// scope, has not been visited, and is not media.
    ///
    /// # Returns
    ///
    /// The number of links enqueued
    pub fn enqueue_links<S: AsRef<str>>(&mut self, links: &[S]) -> usize {
        let mut enqueued = 0;

        for link in links {
            let url = match parse_link(link.as_ref()) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Ignoring link {}: {}", link.as_ref(), e);
                    continue;
                }
            };

            if !self.scope.contains(&url) || self.is_visited(&url) || is_media(&url) {
                continue;
            }

            self.frontier.push_back(url);
            enqueued += 1;
        }

        enqueued
    }

    /// Adds a URL to the back of the frontier without filtering
    pub fn add_to_frontier(&mut self, url: Url) {
        self.frontier.push_back(normalize_url(&url));
    }

    /// Checks whether a URL shares the start URL's scope
    pub fn is_in_scope(&self, url: &Url) -> bool {
        self.scope.contains(url)
    }

    /// Checks whether a URL has already been handed out
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(normalize_url(url).as_str())
    }

    /// The scope links must stay inside
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Returns the number of URLs in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the number of URLs handed out so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the number of dequeued URLs that were skipped
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }
}
