// Ledger service
// Owns the in-memory standings view and keeps it consistent with storage

#![allow(clippy::module_inception)]

pub mod errors;
pub mod ledger;

pub use errors::{LedgerError, LedgerResult};
pub use ledger::Ledger;
