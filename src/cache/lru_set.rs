//! LRU Set Module
//!
//! Fixed-capacity set that evicts the least recently added item.

use std::hash::Hash;

use parking_lot::Mutex;
use tracing::trace;

use crate::cache::LruTracker;

// == LRU Set ==
/// A set bounded by item count with LRU eviction.
///
/// Safe to share between threads; every operation takes the internal lock
/// for its duration only.
#[derive(Debug)]
pub struct LruSet<T> {
    items: Mutex<LruTracker<T>>,
    capacity: usize,
}

impl<T> LruSet<T>
where
    T: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty set holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Mutex::new(LruTracker::with_capacity(capacity)),
            capacity,
        }
    }

    // == Add ==
    /// Adds an item as most recently used.
    ///
    /// An item already present is promoted without growing the set. When the
    /// set is full the least recently used item is evicted first.
    pub fn add(&self, item: T) {
        let mut items = self.items.lock();

        if items.touch(&item) {
            return;
        }
        if self.capacity == 0 {
            return;
        }
        if items.len() >= self.capacity && items.evict_oldest().is_some() {
            trace!(capacity = self.capacity, "LRU set full, evicted oldest item");
        }
        items.insert(item, ());
    }

    // == Contains ==
    /// Returns whether the set contains the item. Does not refresh recency.
    pub fn contains(&self, item: &T) -> bool {
        self.items.lock().contains(item)
    }

    // == Remove ==
    /// Removes an item, returning whether it was present.
    pub fn remove(&self, item: &T) -> bool {
        self.items.lock().remove(item).is_some()
    }

    /// Returns the current number of items.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Returns the maximum number of items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
