// Thin re-export module: the append-only chain lives in `ledger/chain.rs`,
// integrity checking in `ledger/validation.rs`, and the lock-guarded handle
// in `ledger/shared.rs`.

pub mod chain;
pub mod shared;
pub mod validation;

pub use chain::*;
pub use shared::*;
pub use validation::*;
