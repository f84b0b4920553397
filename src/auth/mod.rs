//! Authenticator Module
//!
//! Verifies Basic-Auth credentials against a single configured identity.
//!
//! # Strategies
//! - Plaintext: exact username and password comparison
//! - Message digest: salted SHA-1 / SHA-256 / SHA-512
//! - PBKDF2: salted PBKDF2 with HMAC-SHA1 / SHA256 / SHA512

pub mod hex;
mod key_derivation;
mod message_digest;
mod plaintext;

use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, Result};

pub use key_derivation::{Pbkdf2Algorithm, Pbkdf2Authenticator, DEFAULT_KEY_LENGTH_BITS};
pub use message_digest::{DigestAlgorithm, MessageDigestAuthenticator};
pub use plaintext::PlaintextAuthenticator;

// == Authenticator Trait ==
/// Answers whether the presented credentials match the configured identity.
///
/// `None` stands for a value that was not presented. Mismatches, including
/// missing values, are `false`; implementations never panic on input.
pub trait Authenticator: Send + Sync + fmt::Debug {
    fn check_credentials(&self, username: Option<&str>, password: Option<&str>) -> bool;
}

// == Authenticator Config ==
/// Validated parameters for one of the authenticator strategies.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthenticatorConfig {
    Plaintext {
        username: String,
        password: String,
    },
    MessageDigest {
        username: String,
        password_hash: String,
        algorithm: DigestAlgorithm,
        salt: String,
    },
    Pbkdf2 {
        username: String,
        password_hash: String,
        algorithm: Pbkdf2Algorithm,
        salt: String,
        iterations: u32,
        key_length_bits: u32,
    },
}

impl AuthenticatorConfig {
    /// Name of the configured algorithm, `plaintext` for plaintext.
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            AuthenticatorConfig::Plaintext { .. } => "plaintext",
            AuthenticatorConfig::MessageDigest { algorithm, .. } => algorithm.name(),
            AuthenticatorConfig::Pbkdf2 { algorithm, .. } => algorithm.name(),
        }
    }

    // == Build ==
    /// Constructs the authenticator, failing on any invalid parameter.
    pub fn build(&self) -> Result<Arc<dyn Authenticator>> {
        let authenticator: Arc<dyn Authenticator> = match self {
            AuthenticatorConfig::Plaintext { username, password } => {
                Arc::new(PlaintextAuthenticator::new(username.as_str(), password.as_str())?)
            }
            AuthenticatorConfig::MessageDigest {
                username,
                password_hash,
                algorithm,
                salt,
            } => Arc::new(MessageDigestAuthenticator::new(
                username.as_str(),
                password_hash,
                *algorithm,
                salt.as_str(),
            )?),
            AuthenticatorConfig::Pbkdf2 {
                username,
                password_hash,
                algorithm,
                salt,
                iterations,
                key_length_bits,
            } => Arc::new(Pbkdf2Authenticator::new(
                username.as_str(),
                password_hash,
                *algorithm,
                salt.as_str(),
                *iterations,
                *key_length_bits,
            )?),
        };
        Ok(authenticator)
    }
}

impl fmt::Debug for AuthenticatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthenticatorConfig::Plaintext { username, .. } => f
                .debug_struct("Plaintext")
                .field("username", username)
                .finish_non_exhaustive(),
            AuthenticatorConfig::MessageDigest {
                username, algorithm, ..
            } => f
                .debug_struct("MessageDigest")
                .field("username", username)
                .field("algorithm", algorithm)
                .finish_non_exhaustive(),
            AuthenticatorConfig::Pbkdf2 {
                username,
                algorithm,
                iterations,
                key_length_bits,
                ..
            } => f
                .debug_struct("Pbkdf2")
                .field("username", username)
                .field("algorithm", algorithm)
                .field("iterations", iterations)
                .field("key_length_bits", key_length_bits)
                .finish_non_exhaustive(),
        }
    }
}

// == Generate Hash ==
/// PBKDF2 iteration count and key length (bits) used for `algorithm`,
/// filling in the algorithm defaults. `None` for non-PBKDF2 algorithms.
pub fn resolve_pbkdf2_parameters(
    algorithm: &str,
    iterations: Option<u32>,
    key_length_bits: Option<u32>,
) -> Option<(u32, u32)> {
    let algorithm = algorithm.parse::<Pbkdf2Algorithm>().ok()?;
    Some((
        iterations.unwrap_or_else(|| algorithm.default_iterations()),
        key_length_bits.unwrap_or(DEFAULT_KEY_LENGTH_BITS),
    ))
}

/// Computes the hash to configure for `password` under the named algorithm.
///
/// PBKDF2 iterations and key length fall back to the algorithm defaults.
pub fn generate_hash(
    algorithm: &str,
    salt: &str,
    iterations: Option<u32>,
    key_length_bits: Option<u32>,
    password: &str,
) -> Result<String> {
    let salt = require_non_empty("salt", salt.to_string())?;

    if let Ok(digest) = algorithm.parse::<DigestAlgorithm>() {
        return Ok(MessageDigestAuthenticator::generate_hash(digest, &salt, password));
    }
    let pbkdf2 = algorithm.parse::<Pbkdf2Algorithm>()?;
    let (iterations, key_length_bits) =
        resolve_pbkdf2_parameters(algorithm, iterations, key_length_bits)
            .ok_or_else(|| ConfigError::UnsupportedAlgorithm(algorithm.to_string()))?;
    Pbkdf2Authenticator::generate_hash(pbkdf2, &salt, iterations, key_length_bits, password)
}

pub(crate) fn require_non_empty(name: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(ConfigError::Missing(name.to_string()))
    } else {
        Ok(value)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_colon_grouped() {
        assert_eq!(colon_grouped("00abff"), "00:ab:ff");
    }

    #[test]
    fn test_build_each_strategy() {
        let configs = [
            AuthenticatorConfig::Plaintext {
                username: VALID_USERNAME.into(),
                password: VALID_PASSWORD.into(),
            },
            AuthenticatorConfig::MessageDigest {
                username: VALID_USERNAME.into(),
                password_hash: MessageDigestAuthenticator::generate_hash(
                    DigestAlgorithm::Sha512,
                    SALT,
                    VALID_PASSWORD,
                ),
                algorithm: DigestAlgorithm::Sha512,
                salt: SALT.into(),
            },
            AuthenticatorConfig::Pbkdf2 {
                username: VALID_USERNAME.into(),
                password_hash: Pbkdf2Authenticator::generate_hash(
                    Pbkdf2Algorithm::HmacSha256,
                    SALT,
                    10,
                    DEFAULT_KEY_LENGTH_BITS,
                    VALID_PASSWORD,
                )
                .unwrap(),
                algorithm: Pbkdf2Algorithm::HmacSha256,
                salt: SALT.into(),
                iterations: 10,
                key_length_bits: DEFAULT_KEY_LENGTH_BITS,
            },
        ];

        for config in &configs {
            let authenticator = config.build().unwrap();
            assert!(authenticator.check_credentials(Some(VALID_USERNAME), Some(VALID_PASSWORD)));
            assert!(!authenticator.check_credentials(Some(VALID_USERNAME), Some("Secret")));
            assert!(!authenticator.check_credentials(None, Some(VALID_PASSWORD)));
            assert!(!authenticator.check_credentials(Some(VALID_USERNAME), None));
        }
    }

    #[test]
    fn test_build_rejects_malformed_hash() {
        let config = AuthenticatorConfig::MessageDigest {
            username: VALID_USERNAME.into(),
            password_hash: "not-a-hash".into(),
            algorithm: DigestAlgorithm::Sha1,
            salt: SALT.into(),
        };
        assert!(matches!(config.build(), Err(ConfigError::MalformedHash(_))));
    }

    #[test]
    fn test_config_debug_hides_secrets() {
        let config = AuthenticatorConfig::Plaintext {
            username: VALID_USERNAME.into(),
            password: "hunter2".into(),
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains(VALID_USERNAME));
        assert!(!debug.contains("hunter2"));
        assert_eq!(config.algorithm_name(), "plaintext");
    }

    #[test]
    fn test_generate_hash_dispatch() {
        let digest = generate_hash("SHA-1", SALT, None, None, VALID_PASSWORD).unwrap();
        assert_eq!(
            digest,
            MessageDigestAuthenticator::generate_hash(DigestAlgorithm::Sha1, SALT, VALID_PASSWORD)
        );

        let derived =
            generate_hash("PBKDF2WithHmacSHA256", SALT, Some(10), Some(256), VALID_PASSWORD)
                .unwrap();
        assert_eq!(derived.len(), 64);

        let config = AuthenticatorConfig::Pbkdf2 {
            username: VALID_USERNAME.into(),
            password_hash: derived,
            algorithm: Pbkdf2Algorithm::HmacSha256,
            salt: SALT.into(),
            iterations: 10,
            key_length_bits: 256,
        };
        let authenticator = config.build().unwrap();
        assert!(authenticator.check_credentials(Some(VALID_USERNAME), Some(VALID_PASSWORD)));
    }

    #[test]
    fn test_resolve_pbkdf2_parameters() {
        assert_eq!(
            resolve_pbkdf2_parameters("PBKDF2WithHmacSHA1", None, None),
            Some((1_300_000, 128))
        );
        assert_eq!(
            resolve_pbkdf2_parameters("PBKDF2WithHmacSHA512", Some(1000), None),
            Some((1000, 128))
        );
        assert_eq!(
            resolve_pbkdf2_parameters("PBKDF2WithHmacSHA256", None, Some(512)),
            Some((600_000, 512))
        );
        assert_eq!(resolve_pbkdf2_parameters("SHA-256", Some(1000), Some(256)), None);
    }

    #[test]
    fn test_generate_hash_uses_resolved_defaults() {
        let implicit =
            generate_hash("PBKDF2WithHmacSHA256", SALT, Some(10), None, VALID_PASSWORD).unwrap();
        let explicit = generate_hash(
            "PBKDF2WithHmacSHA256",
            SALT,
            Some(10),
            Some(DEFAULT_KEY_LENGTH_BITS),
            VALID_PASSWORD,
        )
        .unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_generate_hash_errors() {
        assert_eq!(
            generate_hash("plaintext", SALT, None, None, VALID_PASSWORD),
            Err(ConfigError::UnsupportedAlgorithm("plaintext".into()))
        );
        assert_eq!(
            generate_hash("SHA-256", "", None, None, VALID_PASSWORD),
            Err(ConfigError::Missing("salt".into()))
        );
    }

    #[test]
    fn test_require_non_empty() {
        assert_eq!(require_non_empty("salt", "abc".into()).unwrap(), "abc");
        assert_eq!(
            require_non_empty("salt", "  ".into()),
            Err(ConfigError::Missing("salt".into()))
        );
    }
}
