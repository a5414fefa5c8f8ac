// hasher.rs — SHA-256 content hashing for trace records.
//
// Ledger hashes carry an explicit algorithm prefix ("sha256:<hex>") so a
// record is self-describing without reference to this crate.

use sha2::{Digest, Sha256};

pub const HASH_PREFIX: &str = "sha256:";

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

pub fn hash_str(s: &str) -> String {
    hash_bytes(s.as_bytes())
}

/// The prefixed hash stored in a record's line range.
pub fn content_hash(content: &str) -> String {
    format!("{}{}", HASH_PREFIX, hash_str(content))
}

/// Whether `value` has the `sha256:` + 64 lowercase hex form.
pub fn is_content_hash(value: &str) -> bool {
    value.strip_prefix(HASH_PREFIX).is_some_and(|hex| {
        hex.len() == 64
            && hex
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    })
}
