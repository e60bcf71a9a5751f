use serde::{Deserialize, Serialize};

use crate::evaluator::ReportLocator;
use crate::reporting::AssessmentSummary;
use crate::session::{AssessmentSession, SessionPhase, SessionResults};

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub control_id: String,
}

#[derive(Serialize)]
pub struct ResultsView {
    pub summary: AssessmentSummary,
    pub all_passed: bool,
    pub pass_rate: f64,
    pub report: Option<ReportLocator>,
    pub requested: Vec<String>,
    pub duration_ms: u64,
}

impl From<&SessionResults> for ResultsView {
    fn from(results: &SessionResults) -> Self {
        Self {
            all_passed: results.summary.all_passed(),
            pass_rate: results.summary.pass_rate(),
            summary: results.summary.clone(),
            report: results.report.clone(),
            requested: results.requested.ids().to_vec(),
            duration_ms: results.duration_ms(),
        }
    }
}

#[derive(Serialize)]
pub struct SessionView {
    pub id: String,
    pub phase: SessionPhase,
    pub busy: bool,
    pub selection: Vec<String>,
    pub version: u64,
    pub results: Option<ResultsView>,
    pub last_error: Option<String>,
}

impl From<&AssessmentSession> for SessionView {
    fn from(session: &AssessmentSession) -> Self {
        let snapshot = session.selection().snapshot();
        Self {
            id: session.id().to_string(),
            phase: session.phase(),
            busy: session.is_busy(),
            selection: snapshot.ids().to_vec(),
            version: snapshot.version(),
            results: session.results().map(ResultsView::from),
            last_error: session.last_error().map(str::to_string),
        }
    }
}
