use chrono::Utc;
use tracing::{info, warn};

use super::state::{DispatchTicket, SessionPhase, SessionResults, SessionState};
use crate::catalog::Catalog;
use crate::errors::AssessError;
use crate::evaluator::{Evaluator, ReportResolver};
use crate::models::AssessmentResponse;
use crate::reporting::aggregate;
use crate::selection::SelectionStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionPolicy {
    /// Drop the selection when a dispatch fails instead of keeping it for a retry.
    pub clear_selection_on_failure: bool,
}

/// One interactive session: the selection being edited plus the
/// Idle / Dispatching / Results state machine. All transitions go through
/// this type.
pub struct AssessmentSession {
    id: String,
    selection: SelectionStore,
    state: SessionState,
    policy: SessionPolicy,
    next_ticket: u64,
    last_error: Option<String>,
}

impl AssessmentSession {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            selection: SelectionStore::new(),
            state: SessionState::Idle,
            policy,
            next_ticket: 1,
            last_error: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn results(&self) -> Option<&SessionResults> {
        match &self.state {
            SessionState::Results(results) => Some(results),
            _ => None,
        }
    }

    /// Message of the last failed dispatch, cleared by the next dispatch or clear.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn ensure_idle(&self, action: &str) -> Result<(), AssessError> {
        match self.state {
            SessionState::Idle => Ok(()),
            SessionState::Dispatching { .. } => Err(AssessError::SessionBusy(format!(
                "cannot {} while an assessment is in flight",
                action
            ))),
            SessionState::Results(_) => Err(AssessError::InvalidState(format!(
                "cannot {} while results are shown; clear them first",
                action
            ))),
        }
    }

    pub fn toggle(&mut self, control_id: &str) -> Result<bool, AssessError> {
        self.ensure_idle("change the selection")?;
        Ok(self.selection.toggle(control_id))
    }

    pub fn select_all_in_category(&mut self, category: &str, catalog: &Catalog) -> Result<usize, AssessError> {
        self.ensure_idle("change the selection")?;
        self.selection.select_all_in_category(category, catalog)
    }

    /// Idle: empty the selection. Results: discard counts and report and
    /// return to Idle. Rejected while dispatching.
    pub fn clear(&mut self) -> Result<(), AssessError> {
        match self.state {
            SessionState::Dispatching { .. } => {
                return Err(AssessError::SessionBusy(
                    "cannot clear while an assessment is in flight".into(),
                ));
            }
            SessionState::Results(_) => {
                info!(session = %self.id, "Results cleared, back to selection");
                self.state = SessionState::Idle;
            }
            SessionState::Idle => {}
        }
        self.selection.clear();
        self.last_error = None;
        Ok(())
    }

    /// Idle with a non-empty selection moves to Dispatching. This is the only
    /// place a dispatch can start, which makes it single-flight.
    pub fn begin_dispatch(&mut self) -> Result<DispatchTicket, AssessError> {
        self.ensure_idle("start an assessment")?;
        if self.selection.is_empty() {
            return Err(AssessError::EmptySelection);
        }

        let ticket = DispatchTicket {
            id: self.next_ticket,
            snapshot: self.selection.snapshot(),
            started_at: Utc::now(),
        };
        self.next_ticket += 1;
        self.last_error = None;
        self.state = SessionState::Dispatching {
            ticket: ticket.id,
            snapshot: ticket.snapshot.clone(),
            started_at: ticket.started_at,
        };

        info!(session = %self.id, items = ticket.snapshot.len(), "Dispatching assessment");
        Ok(ticket)
    }

    /// Leave Dispatching with the evaluator's outcome. Success aggregates the
    /// verdicts, resolves the report and moves to Results; failure returns to
    /// Idle and hands the error back.
    pub fn complete_dispatch(
        &mut self,
        ticket: DispatchTicket,
        outcome: Result<AssessmentResponse, AssessError>,
        resolver: &ReportResolver,
    ) -> Result<&SessionResults, AssessError> {
        match self.state {
            SessionState::Dispatching { ticket: current, .. } if current == ticket.id => {}
            _ => {
                return Err(AssessError::InvalidState(format!(
                    "dispatch {} is not the one in flight",
                    ticket.id
                )));
            }
        }

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!(session = %self.id, error = %e, "Assessment dispatch failed");
                if self.policy.clear_selection_on_failure {
                    self.selection.clear();
                }
                self.last_error = Some(e.to_string());
                self.state = SessionState::Idle;
                return Err(e);
            }
        };

        let summary = aggregate(&ticket.snapshot, &response);
        let report = resolver.resolve(&response);
        info!(
            session = %self.id,
            evaluated = summary.evaluated,
            passed = summary.passed,
            failed = summary.failed,
            degraded = summary.degraded,
            report = report.is_some(),
            "Assessment completed"
        );

        self.selection.clear();
        self.state = SessionState::Results(SessionResults {
            summary,
            report,
            requested: ticket.snapshot,
            dispatched_at: ticket.started_at,
            completed_at: Utc::now(),
        });

        match &self.state {
            SessionState::Results(results) => Ok(results),
            _ => Err(AssessError::Internal("results state was not recorded".into())),
        }
    }

    /// Run one full cycle against `evaluator`: begin, await, complete.
    pub async fn dispatch(
        &mut self,
        evaluator: &dyn Evaluator,
        resolver: &ReportResolver,
    ) -> Result<&SessionResults, AssessError> {
        let ticket = self.begin_dispatch()?;
        let outcome = evaluator.assess(&ticket.request()).await;
        self.complete_dispatch(ticket, outcome, resolver)
    }
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new(SessionPolicy::default())
    }
}
