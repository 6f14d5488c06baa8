//! Freightledger Core - load settlement ledger for freight brokerage.
//!
//! This crate turns the append-only record set of a freight load
//! (transactions, expenses, charges) into settlement totals, per-stage payment
//! progress, workflow completion and cash position by payment method.
//! It performs no I/O; persistence and presentation live elsewhere.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod loads;
pub mod records;

pub use ledger::*;
pub use loads::*;
pub use records::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
