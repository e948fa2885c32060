//! Demonstration hash table and SHA-256 digests.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::entities::DriverAggregate;
use crate::domain::error::DomainError;

/// Bucket index to surnames, in insertion order per bucket.
pub type Buckets = BTreeMap<usize, Vec<String>>;

/// Distribute surnames over `bucket_count` buckets keyed by name length.
///
/// The hash is `chars(name) % bucket_count`; collisions just append.
/// Every index in `0..bucket_count` is present, empty or not.
#[instrument(level = "debug", skip(records), fields(n = records.len()))]
pub fn bucket(records: &[DriverAggregate], bucket_count: usize) -> Result<Buckets, DomainError> {
    if bucket_count == 0 {
        return Err(DomainError::out_of_domain(
            bucket_count,
            "bucket count must be positive",
        ));
    }
    let mut table: Buckets = (0..bucket_count).map(|i| (i, Vec::new())).collect();
    for record in records {
        let idx = bucket_index(&record.name, bucket_count);
        table.entry(idx).or_default().push(record.surname().to_string());
    }
    Ok(table)
}

pub fn bucket_index(name: &str, bucket_count: usize) -> usize {
    name.chars().count() % bucket_count
}

/// Lowercase hex SHA-256 of the UTF-8 bytes of `text` (64 characters).
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_bucket_index_counts_chars_not_bytes() {
        // "Pérez" is 5 chars, 6 bytes
        assert_eq!(bucket_index("Pérez", 10), 5);
    }
}
