//! Settlement domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::flow_classifier::{bucket, Bucket};
use crate::loads::PaymentModel;
use crate::records::{Charge, ChargeStatus, ChargedTo, Transaction};

/// Who settles the truck side of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverLeg {
    /// Standard model: the broker pays the truck.
    SettledByBroker,
    /// Commission-only model: the provider pays the driver directly.
    PaidByProvider,
    /// No truck assigned yet; driver and commission figures are zero.
    NoTruckAssigned,
}

/// Per-bucket transaction sums for one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTotals {
    pub provider_advance: Decimal,
    pub provider_balance: Decimal,
    pub driver_advance: Decimal,
    pub driver_balance: Decimal,
    pub commission: Decimal,
}

impl BucketTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut totals = BucketTotals::default();
        for tx in transactions {
            *totals.slot_mut(bucket(tx.transaction_type)) += tx.amount;
        }
        totals
    }

    pub fn get(&self, bucket: Bucket) -> Decimal {
        match bucket {
            Bucket::ProviderAdvance => self.provider_advance,
            Bucket::ProviderBalance => self.provider_balance,
            Bucket::DriverAdvance => self.driver_advance,
            Bucket::DriverBalance => self.driver_balance,
            Bucket::Commission => self.commission,
        }
    }

    fn slot_mut(&mut self, bucket: Bucket) -> &mut Decimal {
        match bucket {
            Bucket::ProviderAdvance => &mut self.provider_advance,
            Bucket::ProviderBalance => &mut self.provider_balance,
            Bucket::DriverAdvance => &mut self.driver_advance,
            Bucket::DriverBalance => &mut self.driver_balance,
            Bucket::Commission => &mut self.commission,
        }
    }

    /// Freight received from the provider across both installments
    pub fn provider_received(&self) -> Decimal {
        self.provider_advance + self.provider_balance
    }

    /// Freight paid to the driver across both installments
    pub fn driver_paid(&self) -> Decimal {
        self.driver_advance + self.driver_balance
    }
}

/// Charge totals split by side and status.
///
/// Only the paid figures enter profit and balances; pending and waived
/// charges are tracked for visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargesBreakdown {
    pub paid_party: Decimal,
    pub paid_supplier: Decimal,
    pub pending_party: Decimal,
    pub pending_supplier: Decimal,
    pub waived_party: Decimal,
    pub waived_supplier: Decimal,
}

impl ChargesBreakdown {
    pub fn from_charges(charges: &[Charge]) -> Self {
        let mut breakdown = ChargesBreakdown::default();
        for charge in charges {
            let slot = match (charge.status, charge.charged_to) {
                (ChargeStatus::Paid, ChargedTo::Party) => &mut breakdown.paid_party,
                (ChargeStatus::Paid, ChargedTo::Supplier) => &mut breakdown.paid_supplier,
                (ChargeStatus::Pending, ChargedTo::Party) => &mut breakdown.pending_party,
                (ChargeStatus::Pending, ChargedTo::Supplier) => &mut breakdown.pending_supplier,
                (ChargeStatus::Waived, ChargedTo::Party) => &mut breakdown.waived_party,
                (ChargeStatus::Waived, ChargedTo::Supplier) => &mut breakdown.waived_supplier,
            };
            *slot += charge.amount;
        }
        breakdown
    }
}

/// Financial summary of one load, recomputed from its full record set.
///
/// Figures that do not apply to the load's payment model are zero. Negative
/// balances mean over-payment and are reported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    pub load_id: String,
    pub payment_model: PaymentModel,
    pub driver_leg: DriverLeg,

    pub provider_freight: Decimal,
    pub truck_freight: Decimal,
    /// providerFreight - truckFreight (standard model only)
    pub base_profit: Decimal,

    pub advance_from_provider: Decimal,
    pub balance_from_provider: Decimal,
    pub advance_to_driver: Decimal,
    pub balance_to_driver: Decimal,
    /// Freight received from the provider (advance + balance)
    pub total_received: Decimal,
    /// Freight paid to the driver (advance + balance)
    pub total_paid: Decimal,

    pub commission_amount: Decimal,
    pub commission_received: Decimal,

    pub total_expenses: Decimal,
    pub party_charges: Decimal,
    pub supplier_charges: Decimal,
    pub charges: ChargesBreakdown,

    /// Outstanding receivable: freight under the standard model,
    /// commission under the commission-only model
    pub balance_to_receive: Decimal,
    /// Outstanding freight payable to the truck (standard model only)
    pub balance_to_pay: Decimal,
    pub net_profit: Decimal,
    /// totalReceived + commissionReceived + partyCharges
    pub total_inflow: Decimal,
}

impl SettlementSummary {
    pub fn truck_assigned(&self) -> bool {
        self.driver_leg != DriverLeg::NoTruckAssigned
    }
}
