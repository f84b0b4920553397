//! Salted message digest authenticator (SHA-1, SHA-256, SHA-512).
//!
//! The stored hash is `Hash(utf8(salt + ":" + password))` rendered as hex.

use std::fmt;
use std::str::FromStr;

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::auth::{hex, require_non_empty, Authenticator};
use crate::error::{ConfigError, Result};

// == Digest Algorithm ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Configuration name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA-1" => Ok(DigestAlgorithm::Sha1),
            "SHA-256" => Ok(DigestAlgorithm::Sha256),
            "SHA-512" => Ok(DigestAlgorithm::Sha512),
            other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// == Message Digest Authenticator ==
pub struct MessageDigestAuthenticator {
    username: String,
    /// Canonical (lowercase, unseparated) expected hash
    hash: String,
    algorithm: DigestAlgorithm,
    salt: String,
}

impl MessageDigestAuthenticator {
    /// Creates the authenticator, validating the configured hash against the
    /// algorithm's digest length.
    pub fn new(
        username: impl Into<String>,
        hash: &str,
        algorithm: DigestAlgorithm,
        salt: impl Into<String>,
    ) -> Result<Self> {
        let username = require_non_empty("username", username.into())?;
        let salt = require_non_empty("salt", salt.into())?;
        let hash = hex::parse_expected(hash, algorithm.output_len())?;

        Ok(Self {
            username,
            hash,
            algorithm,
            salt,
        })
    }

    // == Generate Hash ==
    /// Computes the canonical hash for a password.
    pub fn generate_hash(algorithm: DigestAlgorithm, salt: &str, password: &str) -> String {
        let input = format!("{}:{}", salt, password);
        hex::encode(&algorithm.digest(input.as_bytes()))
    }
}

impl Authenticator for MessageDigestAuthenticator {
    fn check_credentials(&self, username: Option<&str>, password: Option<&str>) -> bool {
        let (Some(username), Some(password)) = (username, password) else {
            return false;
        };
        if username != self.username {
            return false;
        }
        let actual = Self::generate_hash(self.algorithm, &self.salt, password);
        hex::hashes_equal(&self.hash, &actual)
    }
}

impl fmt::Debug for MessageDigestAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageDigestAuthenticator")
            .field("username", &self.username)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
