//! Cache Entry Module
//!
//! Per-entry bookkeeping for the credentials cache.

use crate::models::Credentials;

// == Cache Entry ==
/// Metadata stored beside each cached [`Credentials`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Bytes charged against the cache budget for this entry
    pub size_bytes: usize,
}

impl CacheEntry {
    /// Creates the entry for a set of credentials, charging the byte length
    /// of their canonical serialization.
    pub fn for_credentials(credentials: &Credentials) -> Self {
        Self {
            size_bytes: credentials.size_bytes(),
        }
    }
}
