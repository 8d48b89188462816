//! SHA-256 content hashing

use sha2::{Digest, Sha256};

/// Digest length in bytes
pub const DIGEST_LENGTH: usize = 32;

/// Hash content using SHA-256
pub fn digest(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    Sha256::digest(data).into()
}
