//! Recipient selection from the store

use crate::TrawlerError;

/// Which stored addresses a send goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A single address, numbered from 1 as in the store listing
    One(usize),
    /// Every stored address
    All,
}

/// Picks recipients out of the stored addresses
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The chosen addresses, in store order
/// * `Err(TrawlerError::Selection)` - The number is 0 or past the end
pub fn select_recipients(
    stored: &[String],
    selection: Selection,
) -> Result<Vec<String>, TrawlerError> {
    match selection {
        Selection::All => Ok(stored.to_vec()),
        Selection::One(number) => number
            .checked_sub(1)
            .and_then(|index| stored.get(index))
            .map(|email| vec![email.clone()])
            .ok_or(TrawlerError::Selection {
                index: number,
                available: stored.len(),
            }),
    }
}
