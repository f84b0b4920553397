//! Hex canonicalization shared by the hashing authenticators.
//!
//! Configured hashes may be upper or lower case and may group bytes with
//! colons (`AB:CD:..`). Both sides of every comparison go through the same
//! canonical form: lowercase, no separators.

use subtle::ConstantTimeEq;

use crate::error::{ConfigError, Result};

/// Strips colon separators and lowercases.
pub fn canonicalize(hash: &str) -> String {
    hash.chars()
        .filter(|c| *c != ':')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Renders bytes in canonical form.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Canonicalizes a configured hash and checks it decodes to
/// `expected_len` bytes.
pub fn parse_expected(hash: &str, expected_len: usize) -> Result<String> {
    let canonical = canonicalize(hash.trim());
    if canonical.is_empty() {
        return Err(ConfigError::MalformedHash("hash is empty".to_string()));
    }

    let bytes = hex::decode(&canonical)
        .map_err(|e| ConfigError::MalformedHash(format!("not a hex string ({})", e)))?;
    if bytes.len() != expected_len {
        return Err(ConfigError::MalformedHash(format!(
            "expected {} bytes, found {}",
            expected_len,
            bytes.len()
        )));
    }
    Ok(canonical)
}

/// Constant-time equality of two canonical hashes.
pub fn hashes_equal(expected: &str, actual: &str) -> bool {
    expected.len() == actual.len() && expected.as_bytes().ct_eq(actual.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("AB:cd:EF"), "abcdef");
        assert_eq!(canonicalize("abcdef"), "abcdef");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_encode_is_canonical() {
        let encoded = encode(&[0x00, 0xAB, 0xff]);
        assert_eq!(encoded, "00abff");
        assert_eq!(canonicalize(&encoded), encoded);
    }

    #[test]
    fn test_parse_expected() {
        assert_eq!(parse_expected("00:AB:FF", 3).unwrap(), "00abff");
        assert_eq!(parse_expected("00abff", 3).unwrap(), "00abff");
    }

    #[test]
    fn test_parse_expected_rejects_bad_input() {
        assert!(matches!(parse_expected("", 3), Err(ConfigError::MalformedHash(_))));
        assert!(matches!(parse_expected(":::", 3), Err(ConfigError::MalformedHash(_))));
        assert!(matches!(parse_expected("zzabff", 3), Err(ConfigError::MalformedHash(_))));
        assert!(matches!(parse_expected("0abff", 3), Err(ConfigError::MalformedHash(_))));
        assert!(matches!(parse_expected("00abff", 4), Err(ConfigError::MalformedHash(_))));
    }

    #[test]
    fn test_hashes_equal() {
        assert!(hashes_equal("00abff", "00abff"));
        assert!(!hashes_equal("00abff", "00abfe"));
        assert!(!hashes_equal("00abff", "00ab"));
    }
}
