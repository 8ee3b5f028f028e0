//! HashLedger - A tamper-evident append-only ledger
//!
//! # Architecture
//!
//! ## Core Ledger
//! - [`record`] - Record structure and its SHA-256 content hash
//! - [`ledger`] - Append-only chain, integrity verification, shared handle
//! - [`clock`] - Injectable timestamp sources
//!
//! ## Presentation
//! - [`summary`] - Record dumps and the chain diagram
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod clock;
pub mod ledger;
pub mod record;

// ============================================================================
// Presentation
// ============================================================================
pub mod summary;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use error::{LedgerError, Result};
pub use ledger::{FailureKind, IntegrityFailure, Ledger, SharedLedger, Verification};
pub use record::Record;
