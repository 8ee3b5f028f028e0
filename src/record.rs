//! Ledger records and their content hash.

use crate::clock::{format_timestamp, Clock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Previous-hash value carried by the genesis record. A real digest is always
/// 64 hex characters, so this can never collide with one.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub position: u64,
    pub created_at: DateTime<Utc>,
    pub payload: Vec<u8>,
    pub previous_hash: String,
    pub content_hash: String,
}

impl Record {
    /// Builds a record stamped with `clock` and seals it with its content hash.
    pub fn new(
        position: u64,
        payload: impl Into<Vec<u8>>,
        previous_hash: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self::at(position, payload, previous_hash, clock.now())
    }

    /// Same as [`Record::new`] with an explicit creation time.
    pub fn at(
        position: u64,
        payload: impl Into<Vec<u8>>,
        previous_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut record = Record {
            position,
            created_at,
            payload: payload.into(),
            previous_hash: previous_hash.into(),
            content_hash: String::new(),
        };
        record.content_hash = record.compute_hash();
        record
    }

    /// Recomputes the digest from the current field values.
    ///
    /// Preimage: position (decimal) + timestamp + payload + previous hash, with
    /// no separators.
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.position.to_string().as_bytes());
        hasher.update(format_timestamp(&self.created_at).as_bytes());
        hasher.update(&self.payload);
        hasher.update(self.previous_hash.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// True when the stored hash still matches the fields.
    pub fn is_sealed(&self) -> bool {
        self.content_hash == self.compute_hash()
    }

    /// Overwrites the stored hash with a fresh one. Only meaningful after a
    /// deliberate field edit; a normally constructed record is already sealed.
    pub fn reseal(&mut self) {
        self.content_hash = self.compute_hash();
    }

    pub fn is_genesis(&self) -> bool {
        self.position == 0 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    pub fn payload_lossy(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_known_digest() {
        let record = Record::at(0, "genesis", GENESIS_PREVIOUS_HASH, epoch());
        assert_eq!(
            record.content_hash,
            "e9050616dd0012b48dc04dd1d4ad41fac0166afad571507cca74854d5b501568"
        );

        let next = Record::at(1, "A", record.content_hash.clone(), epoch());
        assert_eq!(
            next.content_hash,
            "c4cb6517418273a884c34663fa0fa71cfa1f4d8da4781bed8e6a4430e8af2015"
        );
    }

    #[test]
    fn test_empty_payload_is_hashed() {
        let record = Record::at(0, Vec::new(), GENESIS_PREVIOUS_HASH, epoch());
        assert_eq!(
            record.content_hash,
            "2645d33374f67876282a1d12270aba10cf7abad1aad74f76676eb29a641dac18"
        );
    }

    #[test]
    fn test_digest_shape() {
        let record = Record::new(3, "payload", "ab".repeat(32), &FixedClock::new(epoch()));
        assert_eq!(record.content_hash.len(), DIGEST_HEX_LEN);
        assert!(record
            .content_hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_compute_hash_is_deterministic() {
        let record = Record::at(7, "same input", "f".repeat(64), epoch());
        assert_eq!(record.compute_hash(), record.compute_hash());
        assert_eq!(
            record.content_hash,
            Record::at(7, "same input", "f".repeat(64), epoch()).content_hash
        );
    }

    #[test]
    fn test_every_field_feeds_the_hash() {
        let base = Record::at(1, "data", "a".repeat(64), epoch());

        let mut r = base.clone();
        r.position = 2;
        assert_ne!(r.compute_hash(), base.content_hash);

        let mut r = base.clone();
        r.created_at = epoch() + chrono::Duration::nanoseconds(1);
        assert_ne!(r.compute_hash(), base.content_hash);

        let mut r = base.clone();
        r.payload[0] ^= 0x01;
        assert_ne!(r.compute_hash(), base.content_hash);

        let mut r = base.clone();
        r.previous_hash = "b".repeat(64);
        assert_ne!(r.compute_hash(), base.content_hash);
    }

    #[test]
    fn test_reseal_after_edit() {
        let mut record = Record::at(1, "before", "c".repeat(64), epoch());
        assert!(record.is_sealed());

        record.payload = b"after".to_vec();
        assert!(!record.is_sealed());

        record.reseal();
        assert!(record.is_sealed());
    }

    #[test]
    fn test_genesis_detection() {
        let genesis = Record::at(0, "g", GENESIS_PREVIOUS_HASH, epoch());
        assert!(genesis.is_genesis());
        let other = Record::at(1, "x", genesis.content_hash.clone(), epoch());
        assert!(!other.is_genesis());
    }
}
