//! Payment, expense and charge records attached to a load.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction types
///
/// Closed set of payment stages a transaction can belong to. Direction and
/// bucket are decided by `ledger::classify_flow` / `ledger::bucket`, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// First installment paid by the cargo provider.
    AdvanceFromProvider,
    /// Remaining installment(s) paid by the cargo provider.
    BalanceFromProvider,
    /// First installment paid to the truck/driver.
    AdvanceToDriver,
    /// Remaining installment(s) paid to the truck/driver.
    BalanceToDriver,
    /// Commission collected by the broker.
    Commission,
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::AdvanceFromProvider,
        TransactionType::BalanceFromProvider,
        TransactionType::AdvanceToDriver,
        TransactionType::BalanceToDriver,
        TransactionType::Commission,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::AdvanceFromProvider => "advance_from_provider",
            TransactionType::BalanceFromProvider => "balance_from_provider",
            TransactionType::AdvanceToDriver => "advance_to_driver",
            TransactionType::BalanceToDriver => "balance_to_driver",
            TransactionType::Commission => "commission",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("Unknown transaction type: {}", s))
    }
}

/// Channel through which money moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Upi,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| format!("Unknown payment method: {}", s))
    }
}

/// Side of the deal an ad-hoc charge is billed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargedTo {
    /// Billed to the cargo provider; income for the broker.
    Party,
    /// Billed by the truck side; a cost to the broker.
    Supplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    #[default]
    Pending,
    Paid, // Only paid charges affect totals
    Waived,
}

/// Immutable payment event against one stage of a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub payment_method: PaymentMethod,
    pub date: NaiveDate,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        transaction_type: TransactionType,
        amount: Decimal,
        payment_method: PaymentMethod,
        date: NaiveDate,
    ) -> Self {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            transaction_type,
            payment_method,
            date,
            notes: None,
        }
    }
}

/// Trip cost paid by the broker. Always an outflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub date: NaiveDate,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Expense {
    pub fn new(amount: Decimal, payment_method: PaymentMethod, date: NaiveDate) -> Self {
        Expense {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            payment_method,
            date,
            description: None,
        }
    }
}

/// Ad-hoc adjustment on a load (detention, loading labour, penalties...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: String,
    pub amount: Decimal,
    pub charged_to: ChargedTo,
    #[serde(default)]
    pub status: ChargeStatus,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Charge {
    pub fn new(amount: Decimal, charged_to: ChargedTo, status: ChargeStatus) -> Self {
        Charge {
            id: uuid::Uuid::new_v4().to_string(),
            amount,
            charged_to,
            status,
            description: None,
        }
    }

    /// Check if this charge is paid (should affect totals)
    pub fn is_paid(&self) -> bool {
        self.status == ChargeStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_type_round_trips_through_str() {
        for t in TransactionType::ALL {
            assert_eq!(t.as_str().parse::<TransactionType>(), Ok(t));
        }
        assert!("refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_payment_method_parse_is_case_insensitive() {
        assert_eq!("UPI".parse::<PaymentMethod>(), Ok(PaymentMethod::Upi));
        assert_eq!(
            "Bank_Transfer".parse::<PaymentMethod>(),
            Ok(PaymentMethod::BankTransfer)
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_transaction_json_uses_type_key() {
        let json = r#"{
            "id": "t-1",
            "amount": "5000",
            "type": "advance_from_provider",
            "paymentMethod": "cash",
            "date": "2024-03-01"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_type, TransactionType::AdvanceFromProvider);
        assert_eq!(tx.amount, dec!(5000));
        assert_eq!(tx.notes, None);
    }

    #[test]
    fn test_only_paid_charges_are_paid() {
        assert!(Charge::new(dec!(100), ChargedTo::Party, ChargeStatus::Paid).is_paid());
        assert!(!Charge::new(dec!(100), ChargedTo::Party, ChargeStatus::Pending).is_paid());
        assert!(!Charge::new(dec!(100), ChargedTo::Supplier, ChargeStatus::Waived).is_paid());
    }
}
