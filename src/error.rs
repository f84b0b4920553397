//! Error types for the authentication layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Config Error Enum ==
/// Startup configuration errors. All of these are fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required value was not supplied
    #[error("{0} is a required value")]
    Missing(String),

    /// A value was supplied but could not be used
    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: String, reason: String },

    /// The hash algorithm name is not one we support
    #[error("Unsupported algorithm [{0}]")]
    UnsupportedAlgorithm(String),

    /// The configured password hash is not a usable hex digest
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

// == Auth Error Enum ==
/// Per-request authentication failures.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No Authorization header was sent
    #[error("Missing credentials")]
    MissingCredentials { realm: String },

    /// Authorization header is not valid Basic auth
    #[error("Malformed Authorization header")]
    MalformedHeader { realm: String },

    /// Credentials were checked and rejected
    #[error("Invalid credentials")]
    InvalidCredentials { realm: String },

    /// Verification could not be completed
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let challenge = match &self {
            AuthError::MissingCredentials { realm }
            | AuthError::MalformedHeader { realm }
            | AuthError::InvalidCredentials { realm } => Some(realm.clone()),
            AuthError::Internal(_) => None,
        };

        match challenge {
            Some(realm) => {
                let mut response =
                    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::new(message))).into_response();
                let value = format!("Basic realm=\"{}\"", realm.replace('"', "\\\""));
                if let Ok(value) = HeaderValue::from_str(&value) {
                    response
                        .headers_mut()
                        .insert(header::WWW_AUTHENTICATE, value);
                }
                response
            }
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(message)),
            )
                .into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for configuration and construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
