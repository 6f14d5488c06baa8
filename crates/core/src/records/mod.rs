//! Records module - transactions, expenses, charges and snapshot ingestion.

mod records_model;
mod snapshot;

pub use records_model::{
    Charge, ChargeStatus, ChargedTo, Expense, PaymentMethod, Transaction, TransactionType,
};
pub use snapshot::LoadSnapshot;
