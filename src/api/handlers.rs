//! API Handlers
//!
//! HTTP request handlers and the shared application state.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use tracing::info;

use crate::api::BasicAuth;
use crate::cache::CacheStats;
use crate::config::Config;
use crate::error::Result;
use crate::models::HealthResponse;

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Application state shared across all handlers.
///
/// Holds the authentication layer when one is configured; the credentials
/// cache inside it lives as long as the server.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth: Option<BasicAuth>,
}

impl AppState {
    /// Creates a new AppState with the given authentication layer.
    pub fn new(auth: Option<BasicAuth>) -> Self {
        Self { auth }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the authenticator parameters are invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let auth = match &config.auth {
            Some(auth) => {
                let authenticator = auth.authenticator.build()?;
                info!(
                    algorithm = auth.authenticator.algorithm_name(),
                    realm = %auth.realm,
                    cache_size_bytes = auth.cache_size_bytes,
                    "Basic authentication enabled"
                );
                Some(BasicAuth::new(
                    auth.realm.clone(),
                    authenticator,
                    auth.cache_size_bytes,
                ))
            }
            None => None,
        };
        Ok(Self::new(auth))
    }

    /// Returns the credentials cache statistics, zeroed when authentication
    /// is disabled.
    pub fn cache_stats(&self) -> CacheStats {
        self.auth
            .as_ref()
            .map(|auth| auth.cache.stats())
            .unwrap_or_default()
    }
}

/// Handler for GET /metrics
///
/// Exposes credentials cache statistics in Prometheus text format.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.cache_stats().to_prometheus(),
    )
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
