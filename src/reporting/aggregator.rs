use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{AssessmentResponse, ControlId, ImplementationStatus, Verdict};
use crate::selection::SelectionSnapshot;

/// Verdict for one entry of the evaluator response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlOutcome {
    pub control_id: Option<ControlId>,
    pub status: ImplementationStatus,
    pub verdict: Verdict,
    pub comment: Option<String>,
}

/// Session-level counts. `passed + failed == evaluated` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssessmentSummary {
    /// Controls the user asked to assess.
    pub evaluated: usize,
    pub passed: usize,
    pub failed: usize,
    /// The response had no usable `assessments` array.
    pub degraded: bool,
    pub outcomes: Vec<ControlOutcome>,
}

impl AssessmentSummary {
    pub fn all_passed(&self) -> bool {
        self.evaluated > 0 && self.failed == 0
    }

    /// Percentage of evaluated controls that passed, 0 when nothing was evaluated.
    pub fn pass_rate(&self) -> f64 {
        if self.evaluated == 0 {
            0.0
        } else {
            self.passed as f64 * 100.0 / self.evaluated as f64
        }
    }
}

/// Classify every verdict of `response` and count them against the request.
///
/// `evaluated` comes from the request side. `passed` is capped at
/// `evaluated` and `failed` is derived from the two, so the counts stay
/// consistent however many entries the evaluator returned.
pub fn aggregate(snapshot: &SelectionSnapshot, response: &AssessmentResponse) -> AssessmentSummary {
    let Some(entries) = response.assessments.as_ref() else {
        warn!(requested = snapshot.len(), "Malformed evaluator response, recording empty result");
        return AssessmentSummary {
            degraded: true,
            ..Default::default()
        };
    };

    let evaluated = snapshot.len();
    if entries.len() != evaluated {
        debug!(requested = evaluated, returned = entries.len(), "Evaluator entry count differs from request");
    }
    let positional = entries.len() == evaluated;

    let outcomes: Vec<ControlOutcome> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let status = ImplementationStatus::parse(entry.result.as_deref().unwrap_or_default());
            let control_id = entry.control_id.clone().or_else(|| {
                positional.then(|| snapshot.ids()[i].clone())
            });
            ControlOutcome {
                control_id,
                verdict: status.verdict(),
                status,
                comment: entry.comment.clone(),
            }
        })
        .collect();

    let passed = outcomes
        .iter()
        .filter(|o| o.verdict == Verdict::Pass)
        .count()
        .min(evaluated);

    AssessmentSummary {
        evaluated,
        passed,
        failed: evaluated - passed,
        degraded: false,
        outcomes,
    }
}
