//! Lock-guarded ledger handle for callers that share one ledger.

use crate::error::Result;
use crate::record::Record;
use parking_lot::RwLock;
use std::sync::Arc;

use super::chain::Ledger;
use super::validation::Verification;

/// Cloneable handle to a single ledger.
///
/// Appends hold the write lock across read-tail, build, and push, so two
/// writers can never link to the same tail. Readers hold the read lock and see
/// either the ledger before an append or after it.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Append `payload` and return a copy of the new record.
    pub fn append(&self, payload: impl Into<Vec<u8>>) -> Result<Record> {
        let mut ledger = self.inner.write();
        ledger.append(payload).cloned()
    }

    pub fn tail(&self) -> Result<Record> {
        self.inner.read().tail().cloned()
    }

    pub fn verify(&self) -> Verification {
        self.inner.read().verify()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Record> {
        self.inner.read().records().to_vec()
    }

    /// Run `f` with shared access to the ledger.
    pub fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn write<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    #[test]
    fn test_concurrent_appends_stay_linked_while_verifying() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let shared = SharedLedger::new(Ledger::with_clock(
            Box::new(FixedClock::new(at)),
            "genesis",
        ));

        let done = Arc::new(AtomicBool::new(false));
        let reader = {
            let shared = shared.clone();
            let done = done.clone();
            thread::spawn(move || {
                let mut checks = 0usize;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    assert!(shared.verify().is_valid());
                    assert!(shared.snapshot().iter().all(|r| r.is_sealed()));
                    checks += 1;
                    if finished {
                        return checks;
                    }
                }
            })
        };

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        shared.append(format!("worker {} entry {}", worker, i)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        done.store(true, Ordering::Release);
        assert!(reader.join().unwrap() >= 1);

        assert_eq!(shared.len(), 1 + 8 * 25);
        assert!(shared.verify().is_valid());

        let positions: Vec<u64> = shared.snapshot().iter().map(|r| r.position).collect();
        let expected: Vec<u64> = (0..=200).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_write_closure_exposes_tampering() {
        let shared = SharedLedger::from(Ledger::with_genesis("genesis"));
        shared.append("A").unwrap();
        shared.write(|ledger| {
            ledger.tamper(1).unwrap().payload = b"B".to_vec();
        });
        assert_eq!(shared.verify().failure_index(), Some(1));
        assert_eq!(shared.read(|ledger| ledger.len()), 2);
    }
}
