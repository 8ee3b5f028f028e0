use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, Result};
use crate::record::{Record, GENESIS_PREVIOUS_HASH};
use std::fmt;
use tracing::debug;

use super::validation::{verify_records, Verification};

pub const DEFAULT_GENESIS_PAYLOAD: &str = "Genesis Block - the origin of the ledger";

/// Append-only sequence of hash-linked records.
///
/// Index 0 is always the genesis record. Records are only added through
/// [`Ledger::append`], which links each new record to the current tail.
pub struct Ledger {
    records: Vec<Record>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create a ledger seeded with the default genesis payload, stamped by the
    /// system clock.
    pub fn new() -> Self {
        Self::with_genesis(DEFAULT_GENESIS_PAYLOAD)
    }

    pub fn with_genesis(genesis_payload: impl Into<Vec<u8>>) -> Self {
        Self::with_clock(Box::new(SystemClock), genesis_payload)
    }

    /// Create a ledger whose records are all stamped by `clock`.
    pub fn with_clock(clock: Box<dyn Clock>, genesis_payload: impl Into<Vec<u8>>) -> Self {
        let genesis = Record::new(0, genesis_payload, GENESIS_PREVIOUS_HASH, clock.as_ref());
        debug!("Created genesis record {}", genesis.content_hash);
        Ledger {
            records: vec![genesis],
            clock,
        }
    }

    /// Reassemble a ledger from existing records.
    ///
    /// Only the first record is checked: it must be a genesis record. Call
    /// [`Ledger::verify`] afterwards to find out whether the rest still form
    /// an intact chain.
    pub fn from_records(records: Vec<Record>, clock: Box<dyn Clock>) -> Result<Self> {
        let first = records.first().ok_or(LedgerError::EmptyLedger)?;
        if !first.is_genesis() {
            return Err(LedgerError::InvalidGenesis {
                position: first.position,
                previous_hash: first.previous_hash.clone(),
            });
        }
        Ok(Ledger { records, clock })
    }

    pub fn tail(&self) -> Result<&Record> {
        self.records.last().ok_or(LedgerError::EmptyLedger)
    }

    pub fn genesis(&self) -> Result<&Record> {
        self.records.first().ok_or(LedgerError::EmptyLedger)
    }

    /// Append a record holding `payload`, linked to the current tail.
    ///
    /// The record is fully sealed before it is pushed.
    pub fn append(&mut self, payload: impl Into<Vec<u8>>) -> Result<&Record> {
        let tail = self.tail()?;
        let position = tail
            .position
            .checked_add(1)
            .ok_or(LedgerError::PositionOverflow(tail.position))?;
        let record = Record::new(
            position,
            payload,
            tail.content_hash.clone(),
            self.clock.as_ref(),
        );
        debug!(
            "Appending record #{} ({})",
            record.position, record.content_hash
        );
        self.records.push(record);
        self.tail()
    }

    pub fn verify(&self) -> Verification {
        verify_records(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Mutable access to a stored record, for simulating out-of-band edits.
    ///
    /// Nothing is re-hashed or re-linked; the next [`Ledger::verify`] reports
    /// whatever damage the edit caused.
    pub fn tamper(&mut self, index: usize) -> Result<&mut Record> {
        self.records
            .get_mut(index)
            .ok_or(LedgerError::RecordNotFound(index))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
