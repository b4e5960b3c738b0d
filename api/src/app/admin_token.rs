//! Admin token hashing
//!
//! Only the digest of the configured admin token is kept in memory; incoming
//! bearer tokens are hashed the same way and compared digest to digest.

use sha2::{Digest, Sha256};

/// Hash an admin token for comparison
pub fn hash_admin_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a presented token against the stored digest
pub fn verify_admin_token(presented: &str, expected_hash: &str) -> bool {
    hash_admin_token(presented) == expected_hash
}
