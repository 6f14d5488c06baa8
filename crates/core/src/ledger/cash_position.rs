//! Cash position by payment method.
//!
//! Cash, UPI and bank balances are independent running balances. Charges carry
//! no payment method and never appear here.

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::flow_classifier::{classify_flow, FlowDirection};
use crate::records::{Expense, PaymentMethod, Transaction};

/// Inflow, outflow and balance of one payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodBalance {
    pub method: PaymentMethod,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub balance: Decimal,
}

impl MethodBalance {
    fn empty(method: PaymentMethod) -> Self {
        MethodBalance {
            method,
            inflow: Decimal::ZERO,
            outflow: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}

/// Balances for every payment method plus their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashPosition {
    /// One row per payment method, in `PaymentMethod::ALL` order
    pub by_method: Vec<MethodBalance>,
    /// Sum of the per-method balances
    pub total: Decimal,
    /// Inflow minus outflow computed without method partitioning
    pub net_flow: Decimal,
}

impl CashPosition {
    /// Balance of a single method.
    pub fn balance(&self, method: PaymentMethod) -> Decimal {
        self.by_method
            .iter()
            .find(|row| row.method == method)
            .map(|row| row.balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Whether the per-method total matches the unpartitioned net flow.
    pub fn is_reconciled(&self) -> bool {
        self.total == self.net_flow
    }

    /// Combines positions from several loads into one book.
    pub fn merge(positions: &[CashPosition]) -> CashPosition {
        let mut by_method: Vec<MethodBalance> = PaymentMethod::ALL
            .into_iter()
            .map(MethodBalance::empty)
            .collect();
        let mut net_flow = Decimal::ZERO;

        for position in positions {
            for row in &position.by_method {
                if let Some(target) = by_method.iter_mut().find(|r| r.method == row.method) {
                    target.inflow += row.inflow;
                    target.outflow += row.outflow;
                    target.balance += row.balance;
                }
            }
            net_flow += position.net_flow;
        }

        let total = by_method.iter().map(|row| row.balance).sum();
        CashPosition {
            by_method,
            total,
            net_flow,
        }
    }
}

/// Net balance attributable to one payment method.
pub fn cash_balance_by_method(
    transactions: &[Transaction],
    expenses: &[Expense],
    method: PaymentMethod,
) -> Decimal {
    method_balance(transactions, expenses, method).balance
}

fn method_balance(
    transactions: &[Transaction],
    expenses: &[Expense],
    method: PaymentMethod,
) -> MethodBalance {
    let mut row = MethodBalance::empty(method);

    for tx in transactions.iter().filter(|tx| tx.payment_method == method) {
        match classify_flow(tx.transaction_type) {
            FlowDirection::Inflow => row.inflow += tx.amount,
            FlowDirection::Outflow => row.outflow += tx.amount,
        }
    }
    row.outflow += expenses
        .iter()
        .filter(|e| e.payment_method == method)
        .map(|e| e.amount)
        .sum::<Decimal>();

    row.balance = row.inflow - row.outflow;
    row
}

/// Total inflow minus total outflow, ignoring payment method.
pub fn net_cash_flow(transactions: &[Transaction], expenses: &[Expense]) -> Decimal {
    let mut net = Decimal::ZERO;
    for tx in transactions {
        match classify_flow(tx.transaction_type) {
            FlowDirection::Inflow => net += tx.amount,
            FlowDirection::Outflow => net -= tx.amount,
        }
    }
    for expense in expenses {
        net -= expense.amount;
    }
    net
}

/// Cash position across all payment methods.
pub fn cash_position(transactions: &[Transaction], expenses: &[Expense]) -> CashPosition {
    let by_method: Vec<MethodBalance> = PaymentMethod::ALL
        .into_iter()
        .map(|method| method_balance(transactions, expenses, method))
        .collect();
    let total: Decimal = by_method.iter().map(|row| row.balance).sum();
    let net_flow = net_cash_flow(transactions, expenses);

    if total != net_flow {
        warn!(
            "Cash position does not reconcile: per-method total {} vs net flow {}",
            total, net_flow
        );
    }

    CashPosition {
        by_method,
        total,
        net_flow,
    }
}
