//! Settlement calculator.
//!
//! Turns a load, its optional assignment and its record collections into one
//! consistent `SettlementSummary`. The calculation branches once on the
//! payment model; both branches read the same bucket totals.

use log::debug;
use rust_decimal::Decimal;

use crate::ledger::settlement_model::{
    BucketTotals, ChargesBreakdown, DriverLeg, SettlementSummary,
};
use crate::loads::{Assignment, Load, PaymentModel};
use crate::records::{Charge, Expense, Transaction};

/// Sum of all expense amounts.
pub fn total_expenses(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Computes the settlement summary for one load.
///
/// A missing assignment is not an error: driver and commission figures are
/// zero and the summary reports `DriverLeg::NoTruckAssigned`.
pub fn compute_settlement(
    load: &Load,
    assignment: Option<&Assignment>,
    transactions: &[Transaction],
    expenses: &[Expense],
    charges: &[Charge],
) -> SettlementSummary {
    let buckets = BucketTotals::from_transactions(transactions);
    let charges_breakdown = ChargesBreakdown::from_charges(charges);
    let total_expenses = total_expenses(expenses);
    let party_charges = charges_breakdown.paid_party;
    let supplier_charges = charges_breakdown.paid_supplier;
    let commission_amount = assignment.map(Assignment::commission).unwrap_or(Decimal::ZERO);
    let commission_received = buckets.commission;

    debug!(
        "Computing settlement for load {} ({}, {} transactions, {} expenses, {} charges)",
        load.id,
        load.payment_model,
        transactions.len(),
        expenses.len(),
        charges.len()
    );

    match load.payment_model {
        PaymentModel::CommissionOnly => {
            let driver_leg = if assignment.is_some() {
                DriverLeg::PaidByProvider
            } else {
                DriverLeg::NoTruckAssigned
            };
            let net_profit =
                commission_received - total_expenses - supplier_charges + party_charges;

            SettlementSummary {
                load_id: load.id.clone(),
                payment_model: load.payment_model,
                driver_leg,
                provider_freight: load.provider_freight,
                truck_freight: load.truck_freight_amt(),
                base_profit: Decimal::ZERO,
                advance_from_provider: Decimal::ZERO,
                balance_from_provider: Decimal::ZERO,
                advance_to_driver: Decimal::ZERO,
                balance_to_driver: Decimal::ZERO,
                total_received: Decimal::ZERO,
                total_paid: Decimal::ZERO,
                commission_amount,
                commission_received,
                total_expenses,
                party_charges,
                supplier_charges,
                charges: charges_breakdown,
                balance_to_receive: commission_amount - commission_received,
                balance_to_pay: Decimal::ZERO,
                net_profit,
                total_inflow: commission_received + party_charges,
            }
        }
        PaymentModel::Standard => {
            let truck_freight = load.truck_freight_amt();
            let base_profit = load.provider_freight - truck_freight;
            let total_received = buckets.provider_received();

            // Driver-side figures only exist once a truck is bound to the load.
            let (driver_leg, advance_to_driver, balance_to_driver, balance_to_pay) =
                if assignment.is_some() {
                    (
                        DriverLeg::SettledByBroker,
                        buckets.driver_advance,
                        buckets.driver_balance,
                        truck_freight - buckets.driver_paid(),
                    )
                } else {
                    (
                        DriverLeg::NoTruckAssigned,
                        Decimal::ZERO,
                        Decimal::ZERO,
                        Decimal::ZERO,
                    )
                };

            let net_profit = base_profit + commission_amount + party_charges
                - total_expenses
                - supplier_charges;

            SettlementSummary {
                load_id: load.id.clone(),
                payment_model: load.payment_model,
                driver_leg,
                provider_freight: load.provider_freight,
                truck_freight,
                base_profit,
                advance_from_provider: buckets.provider_advance,
                balance_from_provider: buckets.provider_balance,
                advance_to_driver,
                balance_to_driver,
                total_received,
                total_paid: advance_to_driver + balance_to_driver,
                commission_amount,
                commission_received,
                total_expenses,
                party_charges,
                supplier_charges,
                charges: charges_breakdown,
                balance_to_receive: load.provider_freight - total_received,
                balance_to_pay,
                net_profit,
                total_inflow: total_received + commission_received + party_charges,
            }
        }
    }
}
