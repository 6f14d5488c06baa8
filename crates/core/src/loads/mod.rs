//! Loads module - shipment and truck assignment models.

mod loads_model;

pub use loads_model::{Assignment, Load, LoadStatus, PaymentModel};
