//! Configuration Module
//!
//! Loads server and authentication settings from environment variables.
//! Authentication settings are validated up front; a bad value stops the
//! server from starting rather than accepting all or no credentials.

use std::env;
use std::str::FromStr;

use crate::auth::{
    AuthenticatorConfig, DigestAlgorithm, Pbkdf2Algorithm, DEFAULT_KEY_LENGTH_BITS,
};
use crate::cache::DEFAULT_CACHE_SIZE_BYTES;
use crate::error::{ConfigError, Result};

const PLAINTEXT: &str = "plaintext";

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Basic authentication, None when the endpoint is open
    pub auth: Option<AuthConfig>,
}

/// Basic authentication settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Realm announced in the `WWW-Authenticate` challenge
    pub realm: String,
    /// Byte budget of the credentials cache
    pub cache_size_bytes: usize,
    pub authenticator: AuthenticatorConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `AUTH_USERNAME` - enables Basic authentication when set
    /// - `AUTH_ALGORITHM` - `plaintext` (default), `SHA-1`, `SHA-256`,
    ///   `SHA-512`, `PBKDF2WithHmacSHA1`, `PBKDF2WithHmacSHA256` or
    ///   `PBKDF2WithHmacSHA512`
    /// - `AUTH_PASSWORD` - password for `plaintext`
    /// - `AUTH_PASSWORD_HASH` - hex hash for the hashing algorithms
    /// - `AUTH_SALT` - salt for the hashing algorithms
    /// - `AUTH_ITERATIONS` - PBKDF2 iterations (default depends on algorithm)
    /// - `AUTH_KEY_LENGTH` - PBKDF2 key length in bits (default: 128)
    /// - `AUTH_REALM` - challenge realm (default: "/")
    /// - `AUTH_CACHE_SIZE_BYTES` - credentials cache budget (default: 1 MB)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a Config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = parse_number(&lookup, "SERVER_PORT")?.unwrap_or(3000);

        let auth = match non_blank(&lookup, "AUTH_USERNAME") {
            Some(username) => Some(AuthConfig::from_lookup(&lookup, username)?),
            None => {
                if lookup("AUTH_PASSWORD").is_some() || lookup("AUTH_PASSWORD_HASH").is_some() {
                    return Err(ConfigError::Missing("AUTH_USERNAME".to_string()));
                }
                None
            }
        };

        Ok(Self { server_port, auth })
    }
}

impl AuthConfig {
    fn from_lookup<F>(lookup: &F, username: String) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let realm = non_blank(lookup, "AUTH_REALM").unwrap_or_else(|| "/".to_string());
        let cache_size_bytes =
            parse_number(lookup, "AUTH_CACHE_SIZE_BYTES")?.unwrap_or(DEFAULT_CACHE_SIZE_BYTES);
        let algorithm =
            non_blank(lookup, "AUTH_ALGORITHM").unwrap_or_else(|| PLAINTEXT.to_string());

        let authenticator = if algorithm.eq_ignore_ascii_case(PLAINTEXT) {
            AuthenticatorConfig::Plaintext {
                username,
                password: required(lookup, "AUTH_PASSWORD")?,
            }
        } else if let Ok(algorithm) = algorithm.parse::<DigestAlgorithm>() {
            AuthenticatorConfig::MessageDigest {
                username,
                password_hash: required(lookup, "AUTH_PASSWORD_HASH")?,
                algorithm,
                salt: required(lookup, "AUTH_SALT")?,
            }
        } else if let Ok(algorithm) = algorithm.parse::<Pbkdf2Algorithm>() {
            // Range checks happen in `AuthenticatorConfig::build`
            AuthenticatorConfig::Pbkdf2 {
                username,
                password_hash: required(lookup, "AUTH_PASSWORD_HASH")?,
                algorithm,
                salt: required(lookup, "AUTH_SALT")?,
                iterations: parse_number(lookup, "AUTH_ITERATIONS")?
                    .unwrap_or_else(|| algorithm.default_iterations()),
                key_length_bits: parse_number(lookup, "AUTH_KEY_LENGTH")?
                    .unwrap_or(DEFAULT_KEY_LENGTH_BITS),
            }
        } else {
            return Err(ConfigError::UnsupportedAlgorithm(algorithm));
        };

        Ok(Self {
            realm,
            cache_size_bytes,
            authenticator,
        })
    }
}

// == Lookup Helpers ==
fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(lookup, key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn parse_number<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_blank(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::invalid(key, format!("[{}] is not a valid number", raw))),
        None => Ok(None),
    }
}
