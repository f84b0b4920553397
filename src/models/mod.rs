//! Value types and response models
//!
//! Credentials as parsed from requests, and the DTOs serialized into
//! HTTP response bodies.

pub mod credentials;
pub mod responses;

// Re-export commonly used types
pub use credentials::{CacheKey, Credentials};
pub use responses::{ErrorResponse, HealthResponse};
