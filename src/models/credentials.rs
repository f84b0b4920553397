//! Credential Value Types
//!
//! Username/password pairs as presented in a Basic-Auth header.

use std::fmt;

// == Credentials ==
/// A username/password pair.
///
/// Equality and hashing cover both fields. The `Display` form
/// (`username:password`) is the canonical serialization the credentials
/// cache uses for its byte accounting.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    // == Constructor ==
    /// Creates a new credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }

    // == Size ==
    /// Returns the UTF-8 byte length of the canonical serialization.
    pub fn size_bytes(&self) -> usize {
        self.username.len() + 1 + self.password.len()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.username, self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"...")
            .finish()
    }
}

// == Cache Key ==
/// Identity key with the same value semantics as [`Credentials`].
///
/// Used as the element type of an [`LruSet`](crate::cache::LruSet) when a
/// set of recently seen identities is needed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    username: String,
    password: String,
}

impl CacheKey {
    /// Creates a new cache key.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<&Credentials> for CacheKey {
    fn from(credentials: &Credentials) -> Self {
        Self::new(credentials.username(), credentials.password())
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheKey")
            .field("username", &self.username)
            .field("password", &"...")
            .finish()
    }
}
