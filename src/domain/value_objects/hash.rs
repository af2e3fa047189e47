//! Content Hash Value Object
//!
//! SHA-256 fingerprint of the raw inventory document, used to detect
//! configuration drift between CI runs. It covers the whole document,
//! never a single host.

use std::fmt;

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Number of hex digits in a SHA-256 digest
    pub const HEX_LEN: usize = 64;

    /// Compute the digest of raw, unparsed bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        Self(format!("{:x}", digest))
    }

    pub fn hex(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, other: &ContentHash) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
