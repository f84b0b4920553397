//! scrape_auth - Basic-Auth verification for metrics endpoints
//!
//! Verifies credentials with a plaintext, salted digest or PBKDF2 strategy
//! and memoizes accepted credentials in a byte-bounded LRU cache.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use auth::{Authenticator, AuthenticatorConfig};
pub use cache::{CredentialsCache, LruSet};
pub use config::Config;
pub use models::{CacheKey, Credentials};
