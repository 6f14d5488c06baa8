//! Load and assignment domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MONEY_DECIMAL_PRECISION, PERCENT_MAX};
use crate::errors::{Error, Result};

/// How the broker takes part in the money flow of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentModel {
    /// Broker collects from the provider and pays the truck.
    #[default]
    Standard,
    /// Broker only earns a commission; the provider pays the driver directly.
    CommissionOnly,
}

impl PaymentModel {
    /// Whether the broker settles the provider and driver freight legs itself.
    pub fn settles_freight(self) -> bool {
        matches!(self, PaymentModel::Standard)
    }
}

impl std::fmt::Display for PaymentModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentModel::Standard => write!(f, "standard"),
            PaymentModel::CommissionOnly => write!(f, "commission_only"),
        }
    }
}

impl std::str::FromStr for PaymentModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(PaymentModel::Standard),
            "commission_only" => Ok(PaymentModel::CommissionOnly),
            _ => Err(format!("Unknown payment model: {}", s)),
        }
    }
}

/// Lifecycle status of a load. Variants are declared in lifecycle order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Completed,
}

impl LoadStatus {
    /// Forward-only transition check. Staying on the same status is not an advance.
    pub fn can_advance_to(self, next: LoadStatus) -> bool {
        next > self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoadStatus::Pending => "pending",
            LoadStatus::Assigned => "assigned",
            LoadStatus::InTransit => "in_transit",
            LoadStatus::Delivered => "delivered",
            LoadStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoadStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(LoadStatus::Pending),
            "assigned" => Ok(LoadStatus::Assigned),
            "in_transit" => Ok(LoadStatus::InTransit),
            "delivered" => Ok(LoadStatus::Delivered),
            "completed" => Ok(LoadStatus::Completed),
            _ => Err(format!("Unknown load status: {}", s)),
        }
    }
}

/// One shipment engagement between a cargo provider and the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub id: String,
    /// Amount owed by the cargo provider.
    pub provider_freight: Decimal,
    /// Amount owed to the assigned truck. Absent until a truck is booked.
    #[serde(default)]
    pub truck_freight: Option<Decimal>,
    #[serde(default)]
    pub payment_model: PaymentModel,
    #[serde(default)]
    pub status: LoadStatus,
}

impl Load {
    pub fn new(
        id: impl Into<String>,
        provider_freight: Decimal,
        truck_freight: Option<Decimal>,
        payment_model: PaymentModel,
    ) -> Self {
        Load {
            id: id.into(),
            provider_freight,
            truck_freight,
            payment_model,
            status: LoadStatus::Pending,
        }
    }

    /// Truck freight, treating an unbooked truck as zero.
    pub fn truck_freight_amt(&self) -> Decimal {
        self.truck_freight.unwrap_or(Decimal::ZERO)
    }

    /// Moves the load forward in its lifecycle. Regressions are rejected.
    pub fn advance_status(&mut self, next: LoadStatus) -> Result<()> {
        if !self.status.can_advance_to(next) {
            return Err(Error::InvalidStatusTransition {
                load_id: self.id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        log::debug!("Load {} status {} -> {}", self.id, self.status, next);
        self.status = next;
        Ok(())
    }
}

/// Binding of a truck to a load, carrying the commission terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(default)]
    pub truck_id: Option<String>,
    #[serde(default)]
    pub commission_percentage: Option<Decimal>,
    #[serde(default)]
    pub commission_amount: Option<Decimal>,
}

impl Assignment {
    /// Assignment with a fixed commission amount.
    pub fn with_commission(commission_amount: Decimal) -> Self {
        Assignment {
            truck_id: None,
            commission_percentage: None,
            commission_amount: Some(commission_amount),
        }
    }

    /// Assignment whose commission is a percentage of the provider freight,
    /// rounded to minor units.
    pub fn from_percentage(provider_freight: Decimal, commission_percentage: Decimal) -> Self {
        let commission_amount = (provider_freight * commission_percentage / PERCENT_MAX)
            .round_dp(MONEY_DECIMAL_PRECISION);
        Assignment {
            truck_id: None,
            commission_percentage: Some(commission_percentage),
            commission_amount: Some(commission_amount),
        }
    }

    /// Commission amount, defaulting to zero if not set
    pub fn commission(&self) -> Decimal {
        self.commission_amount.unwrap_or(Decimal::ZERO)
    }
}
