//! Ledger module - settlement, progress, workflow and cash position.
//!
//! Every function here is pure: it recomputes from the records it is handed
//! and keeps nothing between calls.

mod cash_position;
mod flow_classifier;
mod load_ledger;
mod progress;
mod settlement_calculator;
mod settlement_model;
mod workflow;



pub use cash_position::{
    cash_balance_by_method, cash_position, net_cash_flow, CashPosition, MethodBalance,
};
pub use flow_classifier::{bucket, classify_flow, Bucket, FlowDirection};
pub use load_ledger::{LedgerReport, LoadLedger};
pub use progress::{
    payment_stage_progress, percentage_of, progress, stage_progress, stage_target,
    PaymentProgress, StageProgress,
};
pub use settlement_calculator::{compute_settlement, total_expenses};
pub use settlement_model::{BucketTotals, ChargesBreakdown, DriverLeg, SettlementSummary};
pub use workflow::{
    overall_progress, stage_complete, workflow_state, Stage, StageDescriptor, StageRequirement,
    StageState, WorkflowState, WORKFLOW_STAGES,
};
