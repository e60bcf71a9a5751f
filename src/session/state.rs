use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::evaluator::ReportLocator;
use crate::models::AssessmentRequest;
use crate::reporting::AssessmentSummary;
use crate::selection::SelectionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Dispatching,
    Results,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Dispatching => write!(f, "dispatching"),
            Self::Results => write!(f, "results"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionState {
    /// Selection is editable.
    Idle,
    /// One request is in flight; the selection is frozen.
    Dispatching {
        ticket: u64,
        snapshot: SelectionSnapshot,
        started_at: DateTime<Utc>,
    },
    /// Counts and report reference are available.
    Results(SessionResults),
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Idle => SessionPhase::Idle,
            Self::Dispatching { .. } => SessionPhase::Dispatching,
            Self::Results(_) => SessionPhase::Results,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Dispatching { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResults {
    pub summary: AssessmentSummary,
    pub report: Option<ReportLocator>,
    /// The selection that was submitted.
    pub requested: SelectionSnapshot,
    pub dispatched_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SessionResults {
    pub fn duration_ms(&self) -> u64 {
        (self.completed_at - self.dispatched_at).num_milliseconds().max(0) as u64
    }
}

/// Proof that a dispatch was started. Handed back to
/// `AssessmentSession::complete_dispatch` once the evaluator answers.
#[derive(Debug, Clone)]
pub struct DispatchTicket {
    pub(super) id: u64,
    pub(super) snapshot: SelectionSnapshot,
    pub(super) started_at: DateTime<Utc>,
}

impl DispatchTicket {
    pub fn snapshot(&self) -> &SelectionSnapshot {
        &self.snapshot
    }

    pub fn request(&self) -> AssessmentRequest {
        self.snapshot.to_request()
    }
}
