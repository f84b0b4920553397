//! Salted PBKDF2 authenticator (PBKDF2WithHmacSHA1/256/512).

use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::auth::{hex, require_non_empty, Authenticator};
use crate::error::{ConfigError, Result};

/// Key length used when none is configured.
pub const DEFAULT_KEY_LENGTH_BITS: u32 = 128;

// == PBKDF2 Algorithm ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pbkdf2Algorithm {
    HmacSha1,
    HmacSha256,
    HmacSha512,
}

impl Pbkdf2Algorithm {
    /// Configuration name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Pbkdf2Algorithm::HmacSha1 => "PBKDF2WithHmacSHA1",
            Pbkdf2Algorithm::HmacSha256 => "PBKDF2WithHmacSHA256",
            Pbkdf2Algorithm::HmacSha512 => "PBKDF2WithHmacSHA512",
        }
    }

    /// Iteration count used when none is configured.
    pub fn default_iterations(&self) -> u32 {
        match self {
            Pbkdf2Algorithm::HmacSha1 => 1_300_000,
            Pbkdf2Algorithm::HmacSha256 => 600_000,
            Pbkdf2Algorithm::HmacSha512 => 210_000,
        }
    }

    /// Derives `key_len` bytes from the password and salt.
    pub fn derive(&self, password: &[u8], salt: &[u8], iterations: u32, key_len: usize) -> Vec<u8> {
        let mut key = vec![0u8; key_len];
        match self {
            Pbkdf2Algorithm::HmacSha1 => pbkdf2_hmac::<Sha1>(password, salt, iterations, &mut key),
            Pbkdf2Algorithm::HmacSha256 => {
                pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key)
            }
            Pbkdf2Algorithm::HmacSha512 => {
                pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut key)
            }
        }
        key
    }
}

impl FromStr for Pbkdf2Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PBKDF2WithHmacSHA1" => Ok(Pbkdf2Algorithm::HmacSha1),
            "PBKDF2WithHmacSHA256" => Ok(Pbkdf2Algorithm::HmacSha256),
            "PBKDF2WithHmacSHA512" => Ok(Pbkdf2Algorithm::HmacSha512),
            other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Pbkdf2Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks iteration count and key length, returning the key length in bytes.
fn validate_parameters(iterations: u32, key_length_bits: u32) -> Result<usize> {
    if iterations == 0 {
        return Err(ConfigError::invalid("iterations", "must be greater than 0"));
    }
    if key_length_bits == 0 || key_length_bits % 8 != 0 {
        return Err(ConfigError::invalid(
            "key length",
            "must be a positive multiple of 8 bits",
        ));
    }
    Ok((key_length_bits / 8) as usize)
}

// == PBKDF2 Authenticator ==
pub struct Pbkdf2Authenticator {
    username: String,
    /// Canonical (lowercase, unseparated) expected hash
    hash: String,
    algorithm: Pbkdf2Algorithm,
    salt: String,
    iterations: u32,
    key_len: usize,
}

impl Pbkdf2Authenticator {
    pub fn new(
        username: impl Into<String>,
        hash: &str,
        algorithm: Pbkdf2Algorithm,
        salt: impl Into<String>,
        iterations: u32,
        key_length_bits: u32,
    ) -> Result<Self> {
        let username = require_non_empty("username", username.into())?;
        let salt = require_non_empty("salt", salt.into())?;
        let key_len = validate_parameters(iterations, key_length_bits)?;
        let hash = hex::parse_expected(hash, key_len)?;

        Ok(Self {
            username,
            hash,
            algorithm,
            salt,
            iterations,
            key_len,
        })
    }

    // == Generate Hash ==
    /// Computes the canonical hash for a password.
    pub fn generate_hash(
        algorithm: Pbkdf2Algorithm,
        salt: &str,
        iterations: u32,
        key_length_bits: u32,
        password: &str,
    ) -> Result<String> {
        let key_len = validate_parameters(iterations, key_length_bits)?;
        let key = algorithm.derive(password.as_bytes(), salt.as_bytes(), iterations, key_len);
        Ok(hex::encode(&key))
    }
}

impl Authenticator for Pbkdf2Authenticator {
    fn check_credentials(&self, username: Option<&str>, password: Option<&str>) -> bool {
        let (Some(username), Some(password)) = (username, password) else {
            return false;
        };
        if username != self.username {
            return false;
        }
        let key = self.algorithm.derive(
            password.as_bytes(),
            self.salt.as_bytes(),
            self.iterations,
            self.key_len,
        );
        hex::hashes_equal(&self.hash, &hex::encode(&key))
    }
}

impl fmt::Debug for Pbkdf2Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pbkdf2Authenticator")
            .field("username", &self.username)
            .field("algorithm", &self.algorithm)
            .field("iterations", &self.iterations)
            .field("key_length_bits", &(self.key_len * 8))
            .finish_non_exhaustive()
    }
}
