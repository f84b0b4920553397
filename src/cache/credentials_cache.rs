//! Credentials Cache Module
//!
//! Memoizes accepted credentials so repeat scrapes skip the hashing path.
//! The cache is bounded by the cumulative serialized size of its entries
//! rather than by entry count, so memory stays bounded however long the
//! submitted strings are.

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::models::Credentials;

// == Admission ==
/// Outcome of [`CredentialsCache::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Stored as a new entry after evicting `evicted` older entries
    Inserted { evicted: usize },
    /// Already cached; promoted to most recently used
    Promoted,
    /// Larger than the whole cache; not stored
    Rejected,
}

#[derive(Debug, Default)]
struct Inner {
    entries: LruTracker<Credentials, CacheEntry>,
    current_size_bytes: usize,
    stats: CacheStats,
}

// == Credentials Cache ==
/// Byte-bounded LRU cache of verified credentials.
///
/// Invariants, held under the internal lock:
/// - `current_size_bytes` equals the sum of the recorded entry sizes
/// - `current_size_bytes <= maximum_size_bytes`
#[derive(Debug)]
pub struct CredentialsCache {
    inner: Mutex<Inner>,
    maximum_size_bytes: usize,
}

impl CredentialsCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `maximum_size_bytes` bytes of
    /// serialized credentials.
    pub fn new(maximum_size_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            maximum_size_bytes,
        }
    }

    // == Add ==
    /// Adds credentials as most recently used.
    ///
    /// Credentials already cached are promoted without changing the size.
    /// Credentials whose serialized size exceeds the whole budget are not
    /// cached and leave existing entries untouched. Otherwise least recently
    /// used entries are evicted until the new entry fits.
    pub fn add(&self, credentials: Credentials) -> Admission {
        let mut inner = self.inner.lock();

        if inner.entries.touch(&credentials) {
            return Admission::Promoted;
        }

        let entry = CacheEntry::for_credentials(&credentials);
        if entry.size_bytes > self.maximum_size_bytes {
            inner.stats.record_rejection();
            debug!(
                size_bytes = entry.size_bytes,
                maximum_size_bytes = self.maximum_size_bytes,
                "Credentials exceed cache budget, not cached"
            );
            return Admission::Rejected;
        }

        let mut evicted = 0;
        while inner.current_size_bytes + entry.size_bytes > self.maximum_size_bytes {
            let Some((_, old)) = inner.entries.evict_oldest() else {
                break;
            };
            inner.current_size_bytes -= old.size_bytes;
            inner.stats.record_eviction();
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, "Evicted credentials to make room");
        }

        inner.current_size_bytes += entry.size_bytes;
        inner.entries.insert(credentials, entry);

        Admission::Inserted { evicted }
    }

    // == Contains ==
    /// Returns whether equal credentials are cached.
    ///
    /// Records a hit or miss but does not refresh recency.
    pub fn contains(&self, credentials: &Credentials) -> bool {
        let mut inner = self.inner.lock();
        let found = inner.entries.contains(credentials);
        if found {
            inner.stats.record_hit();
        } else {
            inner.stats.record_miss();
        }
        found
    }

    // == Remove ==
    /// Removes cached credentials, returning whether they were present.
    pub fn remove(&self, credentials: &Credentials) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.remove(credentials) {
            Some(entry) => {
                inner.current_size_bytes -= entry.size_bytes;
                true
            }
            None => false,
        }
    }

    /// Returns the maximum cache size in bytes.
    pub fn maximum_size_bytes(&self) -> usize {
        self.maximum_size_bytes
    }

    /// Returns the current cache size in bytes.
    pub fn current_size_bytes(&self) -> usize {
        self.inner.lock().current_size_bytes
    }

    /// Returns the number of cached credentials.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats.current_size_bytes = inner.current_size_bytes;
        stats
    }
}
