//! API Module
//!
//! HTTP handlers, Basic-Auth middleware and routing.
//!
//! # Endpoints
//! - `GET /metrics` - Credentials cache metrics (Basic auth when configured)
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{parse_basic_auth, require_basic_auth, BasicAuth};
pub use routes::create_router;
