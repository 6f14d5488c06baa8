//! Load snapshot ingestion.
//!
//! A snapshot is the consistent point-in-time record set the ledger computes
//! over. Validation happens here, once, so aggregation code can trust every
//! amount it sums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RECORD_AMOUNT, MONEY_DECIMAL_PRECISION, PERCENT_MAX};
use crate::errors::{Result, ValidationError};
use crate::loads::{Assignment, Load};
use crate::records::{Charge, Expense, Transaction};

/// Consistent record set for one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSnapshot {
    pub load: Load,
    #[serde(default)]
    pub assignment: Option<Assignment>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub charges: Vec<Charge>,
}

impl LoadSnapshot {
    pub fn new(load: Load, assignment: Option<Assignment>) -> Self {
        LoadSnapshot {
            load,
            assignment,
            transactions: Vec::new(),
            expenses: Vec::new(),
            charges: Vec::new(),
        }
    }

    /// Decodes and validates a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: LoadSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Rejects any record whose amount would corrupt aggregation.
    pub fn validate(&self) -> Result<()> {
        if self.load.id.trim().is_empty() {
            return Err(ValidationError::MissingField("load.id".to_string()).into());
        }
        check_non_negative(self.load.provider_freight, "load.providerFreight")?;
        if let Some(truck_freight) = self.load.truck_freight {
            check_non_negative(truck_freight, "load.truckFreight")?;
        }

        if let Some(assignment) = &self.assignment {
            if let Some(amount) = assignment.commission_amount {
                check_non_negative(amount, "assignment.commissionAmount")?;
            }
            if let Some(pct) = assignment.commission_percentage {
                if pct < Decimal::ZERO || pct > PERCENT_MAX {
                    return Err(ValidationError::AmountOutOfRange {
                        field: "assignment.commissionPercentage".to_string(),
                        value: pct.to_string(),
                    }
                    .into());
                }
            }
        }

        for (i, tx) in self.transactions.iter().enumerate() {
            check_positive(tx.amount, &format!("transactions[{}].amount", i))?;
        }
        for (i, expense) in self.expenses.iter().enumerate() {
            check_positive(expense.amount, &format!("expenses[{}].amount", i))?;
        }
        for (i, charge) in self.charges.iter().enumerate() {
            check_positive(charge.amount, &format!("charges[{}].amount", i))?;
        }

        Ok(())
    }
}

fn check_non_negative(value: Decimal, field: &str) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    check_range(value, field)
}

fn check_positive(value: Decimal, field: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    check_range(value, field)
}

fn check_range(value: Decimal, field: &str) -> Result<()> {
    if value > MAX_RECORD_AMOUNT {
        return Err(ValidationError::AmountOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    // Money is held in minor units; anything finer cannot be settled.
    if value.normalize().scale() > MONEY_DECIMAL_PRECISION {
        return Err(ValidationError::ExcessPrecision {
            field: field.to_string(),
            value: value.to_string(),
            max_scale: MONEY_DECIMAL_PRECISION,
        }
        .into());
    }
    Ok(())
}
