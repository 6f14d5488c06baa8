//! Core error types for the freight ledger.
//!
//! The ledger performs no I/O, so every error here is a local input failure
//! surfaced synchronously to the caller. Nothing is retried.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to decode load snapshot: {0}")]
    Decode(String),

    #[error("Invalid status transition for load {load_id}: {from} -> {to}")]
    InvalidStatusTransition {
        load_id: String,
        from: String,
        to: String,
    },
}

/// Validation errors raised while ingesting records.
///
/// Amounts are never coerced: a record that fails here must be fixed by the
/// caller before the ledger will aggregate it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveAmount { field: String, value: String },

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: String, value: String },

    #[error("{field} exceeds the maximum supported amount, got {value}")]
    AmountOutOfRange { field: String, value: String },

    #[error("{field} has more than {max_scale} decimal places, got {value}")]
    ExcessPrecision {
        field: String,
        value: String,
        max_scale: u32,
    },

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
