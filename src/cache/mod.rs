//! Cache Module
//!
//! Bounded LRU structures for memoizing verified credentials.

mod credentials_cache;
mod entry;
mod lru;
mod lru_set;
mod stats;


// Re-export public types
pub use credentials_cache::{Admission, CredentialsCache};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use lru_set::LruSet;
pub use stats::CacheStats;

// == Public Constants ==
/// Default credentials cache budget in bytes
pub const DEFAULT_CACHE_SIZE_BYTES: usize = 1024 * 1024; // 1 MB
