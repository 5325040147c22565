//! Filter state store backed by a location query string.
//!
//! The location is the single source of truth. Writes that follow typing
//! (add, update) are debounced through one pending slot; structural writes
//! (remove, reorder, reset, join changes) land immediately and discard
//! whatever was pending.

use crate::codec::{commit, load, QueryKeys};
use crate::filter::FilterCollection;
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Something holding a query string, such as a browser URL or the
/// in-process [`MemoryLocation`].
pub trait Location {
    fn query(&self) -> String;

    fn replace_query(&mut self, query: String);
}

/// In-process location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
    writes: usize,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            writes: 0,
        }
    }

    /// Number of times the query was replaced.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_query(&mut self, query: String) {
        self.query = query;
        self.writes += 1;
    }
}

// ============================================================================
// DEBOUNCER
// ============================================================================

/// Single pending value with a deadline. Scheduling replaces both.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let settled = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if settled {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

// ============================================================================
// STORE
// ============================================================================

pub struct FilterStore<L: Location> {
    location: L,
    keys: QueryKeys,
    known_column_ids: Vec<String>,
    debouncer: Debouncer<FilterCollection>,
}

impl<L: Location> FilterStore<L> {
    pub fn new(location: L, keys: QueryKeys, known_column_ids: Vec<String>, delay: Duration) -> Self {
        Self {
            location,
            keys,
            known_column_ids,
            debouncer: Debouncer::new(delay),
        }
    }

    /// The collection the UI should show: the pending write if any, else
    /// the state decoded from the location.
    pub fn current(&self) -> FilterCollection {
        match self.debouncer.pending() {
            Some(pending) => pending.clone(),
            None => self.committed(),
        }
    }

    /// The state decoded from the location, ignoring pending writes.
    pub fn committed(&self) -> FilterCollection {
        load(&self.location.query(), &self.keys, &self.known_column_ids)
    }

    /// Debounced write.
    pub fn stage(&mut self, collection: FilterCollection, now: Instant) {
        self.debouncer.schedule(collection, now);
    }

    /// Immediate write; any pending write is dropped.
    pub fn commit_now(&mut self, collection: FilterCollection) {
        self.debouncer.cancel();
        self.write(&collection);
    }

    /// Commit the pending write once it has settled. Returns true when the
    /// location was written.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(collection) => {
                self.write(&collection);
                true
            }
            None => false,
        }
    }

    /// Commit the pending write now, as on shutdown.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(collection) => {
                self.write(&collection);
                true
            }
            None => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn keys(&self) -> &QueryKeys {
        &self.keys
    }

    fn write(&mut self, collection: &FilterCollection) {
        let before = self.location.query();
        let after = commit(collection, &self.keys, &before);
        if after != before {
            tracing::debug!(query = %after, entries = collection.len(), "Filter state committed");
            self.location.replace_query(after);
        }
    }
}
