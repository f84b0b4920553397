//! Basic Authentication Middleware
//!
//! Checks the credentials cache first and falls back to the configured
//! authenticator on a miss. Accepted credentials are cached so repeat
//! scrapes skip the hashing path.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use crate::auth::Authenticator;
use crate::cache::{Admission, CredentialsCache};
use crate::error::AuthError;
use crate::models::Credentials;

// == Basic Auth ==
/// Authenticator plus credentials cache for one protected realm.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub realm: String,
    pub authenticator: Arc<dyn Authenticator>,
    pub cache: Arc<CredentialsCache>,
}

impl BasicAuth {
    pub fn new(
        realm: impl Into<String>,
        authenticator: Arc<dyn Authenticator>,
        cache_size_bytes: usize,
    ) -> Self {
        Self {
            realm: realm.into(),
            authenticator,
            cache: Arc::new(CredentialsCache::new(cache_size_bytes)),
        }
    }

    // == Verify ==
    /// Returns whether the credentials are accepted.
    ///
    /// Hashing runs on the blocking pool and never under the cache lock.
    pub async fn verify(&self, credentials: Credentials) -> Result<bool, AuthError> {
        if self.cache.contains(&credentials) {
            return Ok(true);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let candidate = credentials.clone();
        let valid = tokio::task::spawn_blocking(move || {
            authenticator.check_credentials(Some(candidate.username()), Some(candidate.password()))
        })
        .await
        .map_err(|e| AuthError::Internal(format!("credential check failed: {}", e)))?;

        if !valid {
            return Ok(false);
        }

        if self.cache.add(credentials) == Admission::Promoted {
            debug!("Credentials cached concurrently, promoted");
        }
        Ok(true)
    }
}

// == Header Parsing ==
/// Parses an `Authorization: Basic <base64(user:password)>` header value.
///
/// The password may itself contain colons; the split is at the first one.
pub fn parse_basic_auth(value: &str) -> Option<Credentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(Credentials::new(username, password))
}

// == Middleware ==
/// Rejects requests without accepted Basic-Auth credentials.
pub async fn require_basic_auth(
    State(auth): State<BasicAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let credentials = {
        let Some(value) = request.headers().get(AUTHORIZATION) else {
            return Err(AuthError::MissingCredentials { realm: auth.realm });
        };
        value.to_str().ok().and_then(parse_basic_auth)
    };
    let Some(credentials) = credentials else {
        return Err(AuthError::MalformedHeader { realm: auth.realm });
    };

    let username = credentials.username().to_string();
    if !auth.verify(credentials).await? {
        warn!(username = %username, "Rejected Basic-Auth credentials");
        return Err(AuthError::InvalidCredentials { realm: auth.realm });
    }

    Ok(next.run(request).await)
}
