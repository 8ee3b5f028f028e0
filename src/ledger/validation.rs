use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The record's stored hash no longer matches its fields.
    HashMismatch,
    /// The record's previous hash does not match its predecessor's hash.
    LinkBroken,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FailureKind::HashMismatch => write!(f, "HashMismatch"),
            FailureKind::LinkBroken => write!(f, "LinkBroken"),
        }
    }
}

/// First integrity violation found while scanning a chain.
///
/// For `HashMismatch`, `expected` is the stored hash and `actual` the
/// recomputed one. For `LinkBroken`, `expected` is the predecessor's hash and
/// `actual` the previous hash the record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityFailure {
    #[serde(rename = "failureIndex")]
    pub index: usize,
    #[serde(rename = "failureKind")]
    pub kind: FailureKind,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for IntegrityFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at record #{} (expected {}, actual {})",
            self.kind, self.index, self.expected, self.actual
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
    #[serde(flatten)]
    pub failure: Option<IntegrityFailure>,
}

impl Verification {
    pub fn valid() -> Self {
        Self {
            valid: true,
            failure: None,
        }
    }

    pub fn invalid(failure: IntegrityFailure) -> Self {
        Self {
            valid: false,
            failure: Some(failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn failure_index(&self) -> Option<usize> {
        self.failure.as_ref().map(|f| f.index)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }
}

/// Scans `records` left to right and stops at the first broken invariant.
///
/// Each record's own hash is checked before its link to the predecessor. The
/// first record has no predecessor and is only checked for its own hash.
pub fn verify_records(records: &[Record]) -> Verification {
    let mut previous: Option<&Record> = None;

    for (index, current) in records.iter().enumerate() {
        let recomputed = current.compute_hash();
        if recomputed != current.content_hash {
            let failure = IntegrityFailure {
                index,
                kind: FailureKind::HashMismatch,
                expected: current.content_hash.clone(),
                actual: recomputed,
            };
            warn!("Ledger verification failed: {}", failure);
            return Verification::invalid(failure);
        }

        if let Some(prev) = previous {
            if current.previous_hash != prev.content_hash {
                let failure = IntegrityFailure {
                    index,
                    kind: FailureKind::LinkBroken,
                    expected: prev.content_hash.clone(),
                    actual: current.previous_hash.clone(),
                };
                warn!("Ledger verification failed: {}", failure);
                return Verification::invalid(failure);
            }
        }

        previous = Some(current);
    }

    debug!("Ledger verified: {} records intact", records.len());
    Verification::valid()
}
