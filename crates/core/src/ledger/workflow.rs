//! Workflow state derivation.
//!
//! A load's workflow is a fixed, ordered table of stages. Each stage is
//! independently completable and its completion is derived from the record
//! set and the load status on every call. Nothing here is stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PERCENT_MAX;
use crate::ledger::flow_classifier::bucket;
use crate::ledger::progress::stage_progress;
use crate::loads::{Assignment, Load, LoadStatus, PaymentModel};
use crate::records::{Charge, Expense, Transaction, TransactionType};

/// Workflow stages, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AdvanceFromProvider,
    AdvanceToDriver,
    Expenses,
    Loading,
    InTransit,
    Delivered,
    Charges,
    BalanceFromProvider,
    BalanceToDriver,
    Commission,
    Completed,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::AdvanceFromProvider => "advance_from_provider",
            Stage::AdvanceToDriver => "advance_to_driver",
            Stage::Expenses => "expenses",
            Stage::Loading => "loading",
            Stage::InTransit => "in_transit",
            Stage::Delivered => "delivered",
            Stage::Charges => "charges",
            Stage::BalanceFromProvider => "balance_from_provider",
            Stage::BalanceToDriver => "balance_to_driver",
            Stage::Commission => "commission",
            Stage::Completed => "completed",
        }
    }

    pub fn descriptor(self) -> StageDescriptor {
        let requirement = match self {
            Stage::AdvanceFromProvider => {
                StageRequirement::Payment(TransactionType::AdvanceFromProvider)
            }
            Stage::AdvanceToDriver => StageRequirement::Payment(TransactionType::AdvanceToDriver),
            Stage::Expenses => StageRequirement::AnyExpense,
            // No status marks a truck as loading; loading is only observable
            // once the load has left, so both stages share one status set.
            Stage::Loading | Stage::InTransit => StageRequirement::Lifecycle(LOADED),
            Stage::Delivered => StageRequirement::Lifecycle(DELIVERED),
            Stage::Charges => StageRequirement::AnyCharge,
            Stage::BalanceFromProvider => {
                StageRequirement::Payment(TransactionType::BalanceFromProvider)
            }
            Stage::BalanceToDriver => StageRequirement::Payment(TransactionType::BalanceToDriver),
            Stage::Commission => StageRequirement::Payment(TransactionType::Commission),
            Stage::Completed => StageRequirement::Lifecycle(COMPLETED),
        };
        StageDescriptor {
            stage: self,
            requirement,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        WORKFLOW_STAGES
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| format!("Unknown workflow stage: {}", s))
    }
}

/// What has to hold for a stage to count as complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageRequirement {
    /// Progress for this transaction type reaches 100%.
    Payment(TransactionType),
    /// The load status is one of these.
    Lifecycle(&'static [LoadStatus]),
    /// At least one expense is recorded.
    AnyExpense,
    /// At least one charge is recorded.
    AnyCharge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    pub stage: Stage,
    pub requirement: StageRequirement,
}

impl StageDescriptor {
    /// Whether this stage counts toward progress under `model`.
    pub fn applies_to(&self, model: PaymentModel) -> bool {
        match self.requirement {
            StageRequirement::Payment(t) => bucket(t).applies_to(model),
            _ => true,
        }
    }
}

const LOADED: &[LoadStatus] = &[
    LoadStatus::InTransit,
    LoadStatus::Delivered,
    LoadStatus::Completed,
];
const DELIVERED: &[LoadStatus] = &[LoadStatus::Delivered, LoadStatus::Completed];
const COMPLETED: &[LoadStatus] = &[LoadStatus::Completed];

/// Every workflow stage, in display order.
pub const WORKFLOW_STAGES: [Stage; 11] = [
    Stage::AdvanceFromProvider,
    Stage::AdvanceToDriver,
    Stage::Expenses,
    Stage::Loading,
    Stage::InTransit,
    Stage::Delivered,
    Stage::Charges,
    Stage::BalanceFromProvider,
    Stage::BalanceToDriver,
    Stage::Commission,
    Stage::Completed,
];

/// Whether `stage` is complete for the given record set.
pub fn stage_complete(
    stage: Stage,
    load: &Load,
    assignment: Option<&Assignment>,
    transactions: &[Transaction],
    expenses: &[Expense],
    charges: &[Charge],
) -> bool {
    match stage.descriptor().requirement {
        StageRequirement::Payment(t) => stage_progress(t, load, assignment, transactions)
            .progress
            .is_complete(),
        StageRequirement::Lifecycle(statuses) => statuses.contains(&load.status),
        StageRequirement::AnyExpense => !expenses.is_empty(),
        StageRequirement::AnyCharge => !charges.is_empty(),
    }
}

/// Completion of one stage within a workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageState {
    pub stage: Stage,
    pub complete: bool,
}

/// Derived workflow of a load: every applicable stage and overall progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    pub load_id: String,
    pub payment_model: PaymentModel,
    pub status: LoadStatus,
    pub stages: Vec<StageState>,
    pub completed_count: usize,
    pub applicable_count: usize,
    /// completed / applicable, 0..=100
    pub overall_progress: Decimal,
    /// First applicable stage in display order that is not yet complete
    pub next_stage: Option<Stage>,
}

/// Derives the full workflow state. Stages that do not apply to the load's
/// payment model are left out entirely.
pub fn workflow_state(
    load: &Load,
    assignment: Option<&Assignment>,
    transactions: &[Transaction],
    expenses: &[Expense],
    charges: &[Charge],
) -> WorkflowState {
    let stages: Vec<StageState> = WORKFLOW_STAGES
        .into_iter()
        .filter(|stage| stage.descriptor().applies_to(load.payment_model))
        .map(|stage| StageState {
            stage,
            complete: stage_complete(stage, load, assignment, transactions, expenses, charges),
        })
        .collect();

    let completed_count = stages.iter().filter(|s| s.complete).count();
    let applicable_count = stages.len();
    let overall_progress = if applicable_count == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(completed_count) * PERCENT_MAX / Decimal::from(applicable_count)
    };
    let next_stage = stages.iter().find(|s| !s.complete).map(|s| s.stage);

    WorkflowState {
        load_id: load.id.clone(),
        payment_model: load.payment_model,
        status: load.status,
        stages,
        completed_count,
        applicable_count,
        overall_progress,
        next_stage,
    }
}

/// Completed-stage share of applicable stages, as a percentage.
pub fn overall_progress(
    load: &Load,
    assignment: Option<&Assignment>,
    transactions: &[Transaction],
    expenses: &[Expense],
    charges: &[Charge],
) -> Decimal {
    workflow_state(load, assignment, transactions, expenses, charges).overall_progress
}
