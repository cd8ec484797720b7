//! Storage traits and error types
//!
//! This module defines the trait interface for email store backends and
//! associated error types.

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for email store implementations
///
/// A store holds a flat list of addresses. Ordering is whatever the backend
/// preserves; callers treat the contents as a set.
pub trait EmailStore {
    /// Loads every stored address
    ///
    /// A store that does not exist yet loads as empty.
    fn load(&self) -> StoreResult<Vec<String>>;

    /// Replaces the stored contents with `emails`
    fn save(&mut self, emails: &[String]) -> StoreResult<()>;
}
