//! Read-only presentation of a ledger: record summaries, per-record text
//! blocks and the chain diagram. Nothing here feeds back into hashing.

use crate::clock::format_timestamp;
use crate::ledger::Ledger;
use crate::record::Record;
use serde::Serialize;

pub const DEFAULT_HASH_PREVIEW_LEN: usize = 16;
const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub position: u64,
    pub created_at: String,
    /// Leading characters of the content hash, followed by `...`.
    pub hash: String,
    pub payload: String,
    pub previous_hash: String,
    pub genesis: bool,
}

impl RecordSummary {
    pub fn from_record(record: &Record, preview_len: usize) -> Self {
        RecordSummary {
            position: record.position,
            created_at: format_timestamp(&record.created_at),
            hash: shorten_hash(&record.content_hash, preview_len),
            payload: record.payload_lossy(),
            previous_hash: record.previous_hash.clone(),
            genesis: record.is_genesis(),
        }
    }
}

/// Summaries for every record, in position order.
pub fn dump(ledger: &Ledger) -> Vec<RecordSummary> {
    dump_with(ledger, DEFAULT_HASH_PREVIEW_LEN)
}

pub fn dump_with(ledger: &Ledger, preview_len: usize) -> Vec<RecordSummary> {
    ledger
        .iter()
        .map(|record| RecordSummary::from_record(record, preview_len))
        .collect()
}

/// First `len` characters of `hash` plus `...`; short values are returned as is.
pub fn shorten_hash(hash: &str, len: usize) -> String {
    match hash.get(..len) {
        Some(prefix) if prefix.len() < hash.len() => format!("{}...", prefix),
        _ => hash.to_string(),
    }
}

/// Multi-line text block for one record.
pub fn render_record(record: &Record, preview_len: usize) -> String {
    let summary = RecordSummary::from_record(record, preview_len);
    let mut out = format!("Record #{}", summary.position);
    if summary.genesis {
        out.push_str(" (genesis)");
    }
    out.push('\n');
    out.push_str(&format!("Created:       {}\n", summary.created_at));
    out.push_str(&format!("Payload:       {}\n", summary.payload));
    out.push_str(&format!("Previous hash: {}\n", summary.previous_hash));
    out.push_str(&format!("Hash:          {}\n", summary.hash));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out
}

/// One-line picture of the links: `[#0: 1a2b3c4d] → [#1: ...]`.
pub fn chain_diagram(ledger: &Ledger, hash_len: usize) -> String {
    ledger
        .iter()
        .map(|record| {
            let prefix = record
                .content_hash
                .get(..hash_len)
                .unwrap_or(&record.content_hash);
            format!("[#{}: {}]", record.position, prefix)
        })
        .collect::<Vec<_>>()
        .join(" → ")
}
