//! Flow classification for settlement and cash position.
//!
//! Every component that needs to know whether a transaction brings money in
//! or sends it out asks this module. Nothing else matches on transaction types
//! to decide direction.

use serde::{Deserialize, Serialize};

use crate::loads::PaymentModel;
use crate::records::TransactionType;

/// Direction of a transaction from the broker's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    /// Money received by the broker
    Inflow,
    /// Money paid out by the broker
    Outflow,
}

/// Financial bucket a transaction is accumulated into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    ProviderAdvance,
    ProviderBalance,
    DriverAdvance,
    DriverBalance,
    Commission,
}

impl Bucket {
    /// Provider/driver freight installments, as opposed to commission income.
    pub fn is_freight_leg(self) -> bool {
        !matches!(self, Bucket::Commission)
    }

    /// Freight legs are only tracked when the broker settles freight itself.
    pub fn applies_to(self, model: PaymentModel) -> bool {
        model.settles_freight() || !self.is_freight_leg()
    }
}

/// Classify a transaction type as inflow or outflow.
///
/// Inflows:
/// - advance_from_provider, balance_from_provider (freight receivable)
/// - commission (broker income)
///
/// Outflows:
/// - advance_to_driver, balance_to_driver (freight payable)
pub fn classify_flow(transaction_type: TransactionType) -> FlowDirection {
    match transaction_type {
        TransactionType::AdvanceFromProvider
        | TransactionType::BalanceFromProvider
        | TransactionType::Commission => FlowDirection::Inflow,
        TransactionType::AdvanceToDriver | TransactionType::BalanceToDriver => {
            FlowDirection::Outflow
        }
    }
}

/// Bucket a transaction type accumulates into.
pub fn bucket(transaction_type: TransactionType) -> Bucket {
    match transaction_type {
        TransactionType::AdvanceFromProvider => Bucket::ProviderAdvance,
        TransactionType::BalanceFromProvider => Bucket::ProviderBalance,
        TransactionType::AdvanceToDriver => Bucket::DriverAdvance,
        TransactionType::BalanceToDriver => Bucket::DriverBalance,
        TransactionType::Commission => Bucket::Commission,
    }
}
