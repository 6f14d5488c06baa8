//! Partial payment progress per payment stage.
//!
//! A stage can receive any number of installments in any payment method. The
//! tracker itself only knows how to measure paid-vs-target; the target for
//! each stage is derived separately by `stage_target`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PERCENT_MAX;
use crate::ledger::flow_classifier::bucket;
use crate::ledger::settlement_model::BucketTotals;
use crate::loads::{Assignment, Load};
use crate::records::{Transaction, TransactionType};

/// Paid-vs-target progress of one payment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProgress {
    pub total_paid: Decimal,
    /// target - paid; negative on over-payment
    pub remaining: Decimal,
    /// 0..=100
    pub percentage: Decimal,
}

impl PaymentProgress {
    pub fn is_complete(&self) -> bool {
        self.percentage >= PERCENT_MAX
    }
}

/// Progress of a payment stage together with the target it was measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageProgress {
    pub stage_type: TransactionType,
    pub target: Decimal,
    pub applicable: bool,
    #[serde(flatten)]
    pub progress: PaymentProgress,
}

/// Share of `target` covered by `paid`, clamped to 100. A non-positive target
/// reports 0 rather than dividing.
///
/// A ratio too large to represent saturates at 100.
pub fn percentage_of(paid: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match paid
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(PERCENT_MAX))
    {
        Some(pct) => pct.clamp(Decimal::ZERO, PERCENT_MAX),
        None if paid > Decimal::ZERO => PERCENT_MAX,
        None => Decimal::ZERO,
    }
}

/// Measures one stage against a caller-supplied target.
pub fn progress(
    transactions: &[Transaction],
    stage_type: TransactionType,
    target_amount: Decimal,
) -> PaymentProgress {
    let total_paid: Decimal = transactions
        .iter()
        .filter(|tx| tx.transaction_type == stage_type)
        .map(|tx| tx.amount)
        .sum();

    PaymentProgress {
        total_paid,
        remaining: target_amount - total_paid,
        percentage: percentage_of(total_paid, target_amount),
    }
}

/// Target amount for a payment stage.
///
/// - advances target the full freight of their side
/// - balances target what the advance left open, never below zero
/// - commission targets the assignment's commission amount
///
/// Without an assignment the driver and commission targets are zero.
pub fn stage_target(
    stage_type: TransactionType,
    load: &Load,
    assignment: Option<&Assignment>,
    transactions: &[Transaction],
) -> Decimal {
    let truck_freight = if assignment.is_some() {
        load.truck_freight_amt()
    } else {
        Decimal::ZERO
    };

    match stage_type {
        TransactionType::AdvanceFromProvider => load.provider_freight,
        TransactionType::AdvanceToDriver => truck_freight,
        TransactionType::BalanceFromProvider => {
            let paid_advance = paid_for(transactions, TransactionType::AdvanceFromProvider);
            (load.provider_freight - paid_advance).max(Decimal::ZERO)
        }
        TransactionType::BalanceToDriver => {
            let paid_advance = paid_for(transactions, TransactionType::AdvanceToDriver);
            (truck_freight - paid_advance).max(Decimal::ZERO)
        }
        TransactionType::Commission => assignment
            .map(Assignment::commission)
            .unwrap_or(Decimal::ZERO),
    }
}

/// Progress of a stage measured against its derived target.
pub fn stage_progress(
    stage_type: TransactionType,
    load: &Load,
    assignment: Option<&Assignment>,
    transactions: &[Transaction],
) -> StageProgress {
    let target = stage_target(stage_type, load, assignment, transactions);
    StageProgress {
        stage_type,
        target,
        applicable: bucket(stage_type).applies_to(load.payment_model),
        progress: progress(transactions, stage_type, target),
    }
}

/// Progress for all five payment stages, in declaration order.
pub fn payment_stage_progress(
    load: &Load,
    assignment: Option<&Assignment>,
    transactions: &[Transaction],
) -> Vec<StageProgress> {
    TransactionType::ALL
        .into_iter()
        .map(|t| stage_progress(t, load, assignment, transactions))
        .collect()
}

fn paid_for(transactions: &[Transaction], transaction_type: TransactionType) -> Decimal {
    BucketTotals::from_transactions(transactions).get(bucket(transaction_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::PaymentModel;
    use crate::records::PaymentMethod;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(t: TransactionType, amount: Decimal) -> Transaction {
        Transaction::new(
            t,
            amount,
            PaymentMethod::Cash,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        )
    }

    fn load() -> Load {
        Load::new("L-7", dec!(10000), Some(dec!(8000)), PaymentModel::Standard)
    }

    #[test]
    fn test_half_paid_advance() {
        let txs = vec![tx(TransactionType::AdvanceFromProvider, dec!(5000))];
        let p = progress(&txs, TransactionType::AdvanceFromProvider, dec!(10000));
        assert_eq!(p.total_paid, dec!(5000));
        assert_eq!(p.remaining, dec!(5000));
        assert_eq!(p.percentage, dec!(50));
        assert!(!p.is_complete());
    }

    #[test]
    fn test_installments_accumulate() {
        let txs = vec![
            tx(TransactionType::Commission, dec!(300)),
            tx(TransactionType::AdvanceFromProvider, dec!(9999)),
            tx(TransactionType::Commission, dec!(500)),
        ];
        let p = progress(&txs, TransactionType::Commission, dec!(800));
        assert_eq!(p.total_paid, dec!(800));
        assert_eq!(p.remaining, Decimal::ZERO);
        assert!(p.is_complete());
    }

    #[test]
    fn test_overpayment_keeps_negative_remaining_and_caps_percentage() {
        let txs = vec![tx(TransactionType::Commission, dec!(1000))];
        let p = progress(&txs, TransactionType::Commission, dec!(800));
        assert_eq!(p.remaining, dec!(-200));
        assert_eq!(p.percentage, dec!(100));
    }

    #[test]
    fn test_non_positive_target_reports_zero_percent() {
        let txs = vec![tx(TransactionType::Commission, dec!(50))];
        assert_eq!(
            progress(&txs, TransactionType::Commission, Decimal::ZERO).percentage,
            Decimal::ZERO
        );
        assert_eq!(
            progress(&txs, TransactionType::Commission, dec!(-10)).percentage,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_balance_target_subtracts_paid_advance() {
        let txs = vec![
            tx(TransactionType::AdvanceFromProvider, dec!(6000)),
            tx(TransactionType::AdvanceToDriver, dec!(3000)),
        ];
        let assignment = Assignment::with_commission(dec!(800));
        let load = load();
        assert_eq!(
            stage_target(
                TransactionType::BalanceFromProvider,
                &load,
                Some(&assignment),
                &txs
            ),
            dec!(4000)
        );
        assert_eq!(
            stage_target(TransactionType::BalanceToDriver, &load, Some(&assignment), &txs),
            dec!(5000)
        );
        assert_eq!(
            stage_target(TransactionType::Commission, &load, Some(&assignment), &txs),
            dec!(800)
        );
    }

    #[test]
    fn test_balance_target_never_negative() {
        let txs = vec![tx(TransactionType::AdvanceFromProvider, dec!(12000))];
        assert_eq!(
            stage_target(TransactionType::BalanceFromProvider, &load(), None, &txs),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_unassigned_load_has_zero_driver_and_commission_targets() {
        let load = load();
        for t in [
            TransactionType::AdvanceToDriver,
            TransactionType::BalanceToDriver,
            TransactionType::Commission,
        ] {
            assert_eq!(stage_target(t, &load, None, &[]), Decimal::ZERO);
        }
        assert_eq!(
            stage_target(TransactionType::AdvanceFromProvider, &load, None, &[]),
            dec!(10000)
        );
    }

    #[test]
    fn test_payment_stage_progress_marks_applicability() {
        let mut load = load();
        load.payment_model = PaymentModel::CommissionOnly;
        let stages = payment_stage_progress(&load, None, &[]);
        assert_eq!(stages.len(), 5);
        let applicable: Vec<TransactionType> = stages
            .iter()
            .filter(|s| s.applicable)
            .map(|s| s.stage_type)
            .collect();
        assert_eq!(applicable, vec![TransactionType::Commission]);
    }

    #[test]
    fn test_percentage_of_thirds_is_below_complete() {
        let pct = percentage_of(dec!(1), dec!(3));
        assert!(pct > dec!(33.33) && pct < dec!(33.34));
    }

    #[test]
    fn test_percentage_of_saturates_when_ratio_overflows() {
        // 10^12 / 10^-16 fits, scaling it by 100 does not
        let tiny_target = Decimal::new(1, 16);
        assert_eq!(percentage_of(dec!(1000000000000), tiny_target), dec!(100));
        assert_eq!(percentage_of(Decimal::MAX, Decimal::new(1, 28)), dec!(100));
        assert_eq!(percentage_of(Decimal::MIN, Decimal::new(1, 28)), Decimal::ZERO);
    }
}
