//! Storage module for persisting harvested addresses
//!
//! This module handles the email store, including:
//! - The `EmailStore` trait and its JSON file implementation
//! - Merging a crawl's findings into the store (set union)
//! - Removing addresses that outreach has already reached

mod json;
mod traits;

pub use json::JsonEmailStore;
pub use traits::{EmailStore, StoreError, StoreResult};

use std::collections::{BTreeSet, HashSet};

/// Result of merging new addresses into a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Addresses that were not in the store before
    pub added: usize,

    /// Size of the store after the merge
    pub total: usize,
}

/// Merges addresses into the store as a set union
///
/// The store is rewritten sorted and deduplicated, even when nothing new was
/// added.
///
/// # Returns
///
/// * `Ok(MergeOutcome)` - How many addresses were new and the resulting total
/// * `Err(StoreError)` - The store could not be read or written
pub fn merge_emails<S, I>(store: &mut S, new_emails: I) -> StoreResult<MergeOutcome>
where
    S: EmailStore + ?Sized,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut all: BTreeSet<String> = store.load()?.into_iter().collect();
    let before = all.len();

    all.extend(new_emails.into_iter().map(Into::into));

    let merged: Vec<String> = all.into_iter().collect();
    store.save(&merged)?;

    Ok(MergeOutcome {
        added: merged.len() - before,
        total: merged.len(),
    })
}

/// Removes the given addresses from the store
///
/// # Returns
///
/// The number of stored entries that were removed
pub fn remove_sent<S>(store: &mut S, sent: &[String]) -> StoreResult<usize>
where
    S: EmailStore + ?Sized,
{
    let sent: HashSet<&str> = sent.iter().map(String::as_str).collect();
    let stored = store.load()?;
    let before = stored.len();

    let remaining: Vec<String> = stored
        .into_iter()
        .filter(|email| !sent.contains(email.as_str()))
        .collect();
    let removed = before - remaining.len();

    store.save(&remaining)?;
    Ok(removed)
}
