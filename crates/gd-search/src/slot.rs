//! Index publication and query-ordering helpers.
//!
//! The catalog loads asynchronously in the host. Until the index is
//! installed, queries must deterministically report "not ready" rather
//! than silently answer from a partial catalog; afterwards the index is
//! read-only. `IndexSlot` gives the loader a single write and every
//! reader an all-or-nothing view.

use crate::catalog::IconEntry;
use crate::index::SearchIndex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The catalog has not finished loading; no index is installed yet.
    #[error("icon index is not built yet")]
    IndexNotReady,
}

/// Write-once slot publishing a fully built index to concurrent readers.
#[derive(Debug, Default)]
pub struct IndexSlot {
    slot: OnceLock<Arc<SearchIndex>>,
}

impl IndexSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the built index. Returns `false` if one was already
    /// installed — the first build wins and the slot never changes again.
    pub fn install(&self, index: SearchIndex) -> bool {
        self.slot.set(Arc::new(index)).is_ok()
    }

    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The installed index, if any.
    pub fn get(&self) -> Option<Arc<SearchIndex>> {
        self.slot.get().cloned()
    }

    /// Query the installed index, or report that none exists yet.
    pub fn query(&self, text: &str) -> Result<Vec<IconEntry>, SearchError> {
        match self.slot.get() {
            Some(index) => Ok(index.query(text)),
            None => {
                log::debug!("query before catalog load: {text:?}");
                Err(SearchError::IndexNotReady)
            }
        }
    }
}

/// Monotonic ticket dispenser for last-query-wins result handling.
///
/// The index itself is order-agnostic; the caller must drop results whose
/// ticket is no longer current so a slow early query cannot clobber the
/// newest one's display.
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: AtomicU64,
}

impl QuerySequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next ticket, making it the current one.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether `ticket` is still the most recently issued.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_before_install_reports_not_ready() {
        let slot = IndexSlot::new();
        assert!(!slot.is_ready());
        assert_eq!(slot.query("home"), Err(SearchError::IndexNotReady));
    }

    #[test]
    fn query_after_install_answers() {
        let slot = IndexSlot::new();
        assert!(slot.install(SearchIndex::build(vec![IconEntry::new("home", "<svg/>")])));

        let results = slot.query("home").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "home");
    }

    #[test]
    fn first_install_wins() {
        let slot = IndexSlot::new();
        assert!(slot.install(SearchIndex::build(vec![IconEntry::new("first", "<svg/>")])));
        assert!(!slot.install(SearchIndex::build(Vec::new())));

        assert_eq!(slot.get().unwrap().len(), 1);
    }

    #[test]
    fn stale_tickets_lose() {
        let seq = QuerySequencer::new();
        let first = seq.begin();
        assert!(seq.is_current(first));

        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
