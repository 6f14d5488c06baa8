use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::ledger::cash_position::{cash_position, CashPosition};
use crate::ledger::progress::{payment_stage_progress, StageProgress};
use crate::ledger::settlement_calculator::compute_settlement;
use crate::ledger::settlement_model::SettlementSummary;
use crate::ledger::workflow::{stage_complete, workflow_state, Stage, WorkflowState};
use crate::records::LoadSnapshot;

/// Every computed view of one load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    pub settlement: SettlementSummary,
    pub progress: Vec<StageProgress>,
    pub workflow: WorkflowState,
    pub cash_position: CashPosition,
}

/// Read-only ledger view over a validated snapshot.
///
/// Holds no state of its own; every call recomputes from the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct LoadLedger<'a> {
    snapshot: &'a LoadSnapshot,
}

impl<'a> LoadLedger<'a> {
    /// Validates the snapshot and wraps it.
    pub fn new(snapshot: &'a LoadSnapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(LoadLedger { snapshot })
    }

    pub fn settlement(&self) -> SettlementSummary {
        let s = self.snapshot;
        compute_settlement(
            &s.load,
            s.assignment.as_ref(),
            &s.transactions,
            &s.expenses,
            &s.charges,
        )
    }

    pub fn progress(&self) -> Vec<StageProgress> {
        let s = self.snapshot;
        payment_stage_progress(&s.load, s.assignment.as_ref(), &s.transactions)
    }

    pub fn stage_complete(&self, stage: Stage) -> bool {
        let s = self.snapshot;
        stage_complete(
            stage,
            &s.load,
            s.assignment.as_ref(),
            &s.transactions,
            &s.expenses,
            &s.charges,
        )
    }

    pub fn workflow(&self) -> WorkflowState {
        let s = self.snapshot;
        workflow_state(
            &s.load,
            s.assignment.as_ref(),
            &s.transactions,
            &s.expenses,
            &s.charges,
        )
    }

    pub fn cash_position(&self) -> CashPosition {
        cash_position(&self.snapshot.transactions, &self.snapshot.expenses)
    }

    pub fn report(&self) -> LedgerReport {
        LedgerReport {
            settlement: self.settlement(),
            progress: self.progress(),
            workflow: self.workflow(),
            cash_position: self.cash_position(),
        }
    }
}
