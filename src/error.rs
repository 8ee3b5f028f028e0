//! Error types for HashLedger

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Tail/Append on a ledger with no genesis record.
    #[error("Ledger is empty: no genesis record")]
    EmptyLedger,
    /// The first record of a rebuilt ledger is not a genesis record.
    #[error("Invalid genesis record: position {position}, previous hash {previous_hash:?}")]
    InvalidGenesis { position: u64, previous_hash: String },
    #[error("Record position overflow after position {0}")]
    PositionOverflow(u64),
    #[error("Record not found at index {0}")]
    RecordNotFound(usize),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;
