//! Common utilities

use xxhash_rust::xxh3::xxh3_64;

/// Compute the xxh3 digest of bytes as 16 hex characters
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}
